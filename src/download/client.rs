//! Authenticated HTTP client for the data portal.
//!
//! This module provides the `HubClient` struct which issues search requests
//! and streams product downloads to disk, attaching HTTP basic
//! authentication to every request.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use indicatif::ProgressBar;
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, WRITE_BUFFER_BYTES};
use super::error::DownloadError;
use super::filename::product_filename;
use super::progress::ProgressReporter;
use crate::auth::Credentials;
use crate::parser::{HubEndpoint, UrlKind, urls_from_search_response};
use crate::user_agent;

/// HTTP timeout settings for [`HubClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Per-read timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

/// Result of a single product download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The product was written to `path`.
    Downloaded {
        /// Output file path.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// A file with the same name and size already existed.
    Skipped {
        /// Existing file path.
        path: PathBuf,
        /// Size of the existing file.
        bytes: u64,
    },
}

impl DownloadOutcome {
    /// Returns the local file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded { path, .. } | Self::Skipped { path, .. } => path,
        }
    }
}

/// Authenticated client for one portal endpoint.
///
/// Created once per run and reused for every request, taking advantage of
/// connection pooling.
///
/// # Example
///
/// ```no_run
/// use sentinel_dl::auth::Credentials;
/// use sentinel_dl::download::{HubClient, ProgressReporter};
/// use sentinel_dl::parser::HubEndpoint;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HubClient::new(Credentials::new("user", "secret"), HubEndpoint::default())?;
/// let outcome = client
///     .download_product(
///         "https://scihub.esa.int/dhus/odata/v1/Products('2b17b57d')/$value",
///         Path::new("./data"),
///         ProgressReporter::hidden(),
///     )
///     .await?;
/// println!("Saved: {}", outcome.path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HubClient {
    client: Client,
    credentials: Credentials,
    endpoint: HubEndpoint,
}

impl HubClient {
    /// Creates a client with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, endpoint: HubEndpoint) -> Result<Self, DownloadError> {
        Self::with_settings(credentials, endpoint, ClientSettings::default())
    }

    /// Creates a client with explicit timeout settings.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the HTTP client cannot be built.
    #[instrument(level = "debug", skip(credentials, endpoint), fields(base_url = %endpoint.base_url()))]
    pub fn with_settings(
        credentials: Credentials,
        endpoint: HubEndpoint,
        settings: ClientSettings,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .read_timeout(Duration::from_secs(settings.read_timeout_secs))
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;

        Ok(Self {
            client,
            credentials,
            endpoint,
        })
    }

    /// Returns the portal endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &HubEndpoint {
        &self.endpoint
    }

    /// Runs a search query and returns every product download URL it lists.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] if `url` is not a search URL,
    /// a request/status error if the portal call fails, or
    /// [`DownloadError::Parse`] if the response is not a valid feed.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn search(&self, url: &str) -> Result<Vec<String>, DownloadError> {
        if self.endpoint.classify(url) != UrlKind::Search {
            return Err(DownloadError::invalid_url(url));
        }

        info!("searching");
        let response = self.send_get(url).await?;
        let body = response.text().await.map_err(|e| map_request_error(url, e))?;
        let urls = urls_from_search_response(&body, url)?;
        info!(products = urls.len(), "search complete");
        Ok(urls)
    }

    /// Downloads one product into `output_dir`.
    ///
    /// The file is named from the `Content-Disposition` header, falling back
    /// to the product id. An existing file of the same name whose size equals
    /// the announced `Content-Length` is left untouched and reported as
    /// [`DownloadOutcome::Skipped`]; any other existing file is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] if `url` is not a product
    /// download URL (no request is sent), network/status/auth errors for a
    /// failed request, and IO or integrity errors for a failed write. A
    /// partially written file is removed before the error is returned.
    #[must_use = "download outcome reports the path and whether the product was skipped"]
    #[instrument(skip(self, progress), fields(url = %url))]
    pub async fn download_product(
        &self,
        url: &str,
        output_dir: &Path,
        progress: ProgressReporter,
    ) -> Result<DownloadOutcome, DownloadError> {
        let UrlKind::Download { product_id } = self.endpoint.classify(url) else {
            return Err(DownloadError::invalid_url(url));
        };

        let response = self.send_get(url).await?;

        let headers = response.headers();
        let filename = product_filename(
            headers.get(CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            &product_id,
        );
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let file_path = output_dir.join(&filename);
        debug!(filename = %filename, ?content_length, "resolved output path");

        if let Some(expected) = content_length
            && let Ok(metadata) = tokio::fs::metadata(&file_path).await
            && metadata.is_file()
            && metadata.len() == expected
        {
            info!(path = %file_path.display(), "already downloaded, skipping");
            return Ok(DownloadOutcome::Skipped {
                path: file_path,
                bytes: expected,
            });
        }

        let mut file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        let bar = progress.start(&filename, content_length);
        let stream_result = stream_to_file(&mut file, response, url, &file_path, &bar).await;
        drop(file);

        let bytes_written = match stream_result {
            Ok(bytes) => bytes,
            Err(e) => {
                bar.abandon();
                debug!(path = %file_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&file_path).await;
                return Err(e);
            }
        };
        bar.finish_and_clear();

        if let Some(expected) = content_length
            && expected != bytes_written
        {
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(DownloadError::integrity(
                file_path,
                expected,
                bytes_written,
            ));
        }

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            "download complete"
        );

        Ok(DownloadOutcome::Downloaded {
            path: file_path,
            bytes: bytes_written,
        })
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()
            .await
            .map_err(|e| map_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            if matches!(status_code, 401 | 403) {
                return Err(DownloadError::auth_rejected(url, status_code));
            }
            return Err(DownloadError::http_status(url, status_code));
        }

        Ok(response)
    }
}

fn map_request_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else {
        DownloadError::network(url, error)
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    bar: &ProgressBar,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| map_request_error(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
        bar.set_position(bytes_written);
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
