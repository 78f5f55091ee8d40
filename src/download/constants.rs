//! Constants for the download module (timeouts, chunking).

/// Default HTTP connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout in seconds.
///
/// Applies to each read from the socket, not the whole transfer, so large
/// products are not cut off while data keeps arriving.
pub const READ_TIMEOUT_SECS: u64 = 60;

/// Write buffer size for streaming product bodies to disk (128 KiB).
pub const WRITE_BUFFER_BYTES: usize = 128 * 1024;
