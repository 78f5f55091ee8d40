//! Maps batch counts to the process exit outcome.

use crate::ProcessExit;

/// Determines the process exit outcome from succeeded and failed product counts.
///
/// Skipped products count as succeeded.
pub(crate) fn determine_exit_outcome(succeeded: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if succeeded > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}
