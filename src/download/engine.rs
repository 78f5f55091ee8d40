//! Sequential download engine.
//!
//! The engine turns a classified [`HubInput`] into product downloads, one
//! request at a time:
//!
//! - a download URL is fetched directly;
//! - a search URL is queried and every product it lists is fetched;
//! - a metalink file is parsed and every `<url>` entry is fetched.
//!
//! # Example
//!
//! ```no_run
//! use sentinel_dl::auth::Credentials;
//! use sentinel_dl::download::{DownloadEngine, HubClient, ProgressReporter};
//! use sentinel_dl::parser::{HubEndpoint, classify_input};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HubClient::new(Credentials::new("user", "secret"), HubEndpoint::default())?;
//! let engine = DownloadEngine::new(client, ProgressReporter::hidden());
//! let input = classify_input("products.meta4")?;
//! let stats = engine.run(&input, Path::new("./data")).await?;
//! println!("Completed: {}, Skipped: {}, Failed: {}", stats.completed(), stats.skipped(), stats.failed());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use super::client::{DownloadOutcome, HubClient};
use super::error::DownloadError;
use super::progress::ProgressReporter;
use crate::parser::{HubInput, UrlKind, read_metalink_file};

/// A failed item from a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDownload {
    /// URL that failed.
    pub url: String,
    /// Error message.
    pub reason: String,
}

/// Statistics from a download run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadStats {
    completed: usize,
    skipped: usize,
    failures: Vec<FailedDownload>,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of products written to disk.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Returns the number of products skipped because they already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns the total number of download attempts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.failed()
    }

    /// Returns the failed items in the order they were attempted.
    #[must_use]
    pub fn failures(&self) -> &[FailedDownload] {
        &self.failures
    }

    fn record_outcome(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { .. } => self.completed += 1,
            DownloadOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    fn record_failure(&mut self, url: &str, error: &DownloadError) {
        self.failures.push(FailedDownload {
            url: url.to_string(),
            reason: error.to_string(),
        });
    }
}

/// Processes portal input sequentially with a single [`HubClient`].
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    client: HubClient,
    progress: ProgressReporter,
}

impl DownloadEngine {
    /// Creates an engine around `client`.
    #[must_use]
    pub fn new(client: HubClient, progress: ProgressReporter) -> Self {
        Self { client, progress }
    }

    /// Processes one classified input.
    ///
    /// # Errors
    ///
    /// Errors that prevent the run from starting are returned directly: an
    /// unrecognized URL, a failed single-product download, a failed search
    /// request, or an unreadable metalink file. Failures of individual
    /// products inside a search result or metalink batch are recorded in
    /// the returned [`DownloadStats`] instead.
    #[instrument(skip(self, input), fields(input = %input))]
    pub async fn run(
        &self,
        input: &HubInput,
        output_dir: &Path,
    ) -> Result<DownloadStats, DownloadError> {
        match input {
            HubInput::Url(url) => match self.client.endpoint().classify(url) {
                UrlKind::Download { product_id } => {
                    debug!(product_id = %product_id, "single product download");
                    let outcome = self
                        .client
                        .download_product(url, output_dir, self.progress)
                        .await?;
                    let mut stats = DownloadStats::new();
                    stats.record_outcome(&outcome);
                    Ok(stats)
                }
                UrlKind::Search => {
                    let urls = self.client.search(url).await?;
                    if urls.is_empty() {
                        warn!("search returned no products");
                    }
                    Ok(self.download_all(&urls, output_dir).await)
                }
                UrlKind::Unrecognized => Err(DownloadError::invalid_url(url.as_str())),
            },
            HubInput::MetalinkFile(path) => {
                let urls = read_metalink_file(path)?;
                info!(path = %path.display(), urls = urls.len(), "parsed metalink file");
                if urls.is_empty() {
                    warn!(path = %path.display(), "metalink file lists no URLs");
                }
                Ok(self.download_all(&urls, output_dir).await)
            }
        }
    }

    /// Downloads every URL in order, one attempt each.
    ///
    /// A failure is logged and recorded; processing continues with the next
    /// URL.
    pub async fn download_all(&self, urls: &[String], output_dir: &Path) -> DownloadStats {
        let mut stats = DownloadStats::new();
        let total = urls.len();

        for (index, url) in urls.iter().enumerate() {
            info!(item = index + 1, total, url = %url, "processing product");
            match self
                .client
                .download_product(url, output_dir, self.progress)
                .await
            {
                Ok(outcome) => stats.record_outcome(&outcome),
                Err(error) => {
                    warn!(url = %url, error = %error, "download failed");
                    stats.record_failure(url, &error);
                }
            }
        }

        info!(
            completed = stats.completed(),
            skipped = stats.skipped(),
            failed = stats.failed(),
            total = stats.total(),
            "batch finished"
        );
        stats
    }
}
