//! Portal HTTP client and download engine.
//!
//! This module provides functionality for querying the portal and
//! downloading products with streaming support to handle large files
//! efficiently.
//!
//! # Features
//!
//! - HTTP basic authentication on every request
//! - Streaming downloads (memory-efficient for multi-gigabyte products)
//! - Filename extraction from Content-Disposition headers
//! - Skips products already on disk with matching size
//! - Transfer progress bars (bytes, rate, ETA)
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use sentinel_dl::auth::Credentials;
//! use sentinel_dl::download::{HubClient, ProgressReporter};
//! use sentinel_dl::parser::HubEndpoint;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HubClient::new(Credentials::new("user", "secret"), HubEndpoint::default())?;
//! let urls = client
//!     .search("https://scihub.esa.int/dhus/odata/v1/Products?$top=5")
//!     .await?;
//! for url in &urls {
//!     client.download_product(url, Path::new("./data"), ProgressReporter::hidden()).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod filename;
mod progress;

pub use client::{ClientSettings, DownloadOutcome, HubClient};
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use engine::{DownloadEngine, DownloadStats, FailedDownload};
pub use error::DownloadError;
pub use filename::product_filename;
pub use progress::ProgressReporter;
