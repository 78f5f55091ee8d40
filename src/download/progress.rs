//! Transfer progress bars for product downloads.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA {eta})";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} {bytes} ({bytes_per_sec})";

/// Creates one progress bar per download, or hidden bars when disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressReporter {
    enabled: bool,
}

impl ProgressReporter {
    /// Reporter that draws bars on stderr.
    #[must_use]
    pub fn visible() -> Self {
        Self { enabled: true }
    }

    /// Reporter whose bars are never drawn.
    #[must_use]
    pub fn hidden() -> Self {
        Self { enabled: false }
    }

    /// Returns whether bars are drawn.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Starts a bar for `filename`. Unknown sizes get a byte-counting spinner.
    #[must_use]
    pub fn start(self, filename: &str, total_bytes: Option<u64>) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let bar = match total_bytes {
            Some(total) => ProgressBar::new(total).with_style(
                ProgressStyle::with_template(BAR_TEMPLATE)
                    .map(|style| style.progress_chars("=> "))
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            ),
            None => ProgressBar::new_spinner().with_style(
                ProgressStyle::with_template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            ),
        };
        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.set_message(filename.to_string());
        bar
    }
}
