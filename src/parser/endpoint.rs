//! Portal endpoint and the URL shapes it serves.
//!
//! The DHuS OData API exposes two kinds of URLs the tool understands:
//!
//! - product download: `<base>odata/v1/Products('<id>')/$value`
//! - product search:   `<base>odata/v1/Products?<query>`

use regex::Regex;
use tracing::trace;

use super::error::ParseError;
use super::input::validate_url;

/// Default portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://scihub.esa.int/dhus/";

const PRODUCTS_PATH: &str = "odata/v1/Products";

/// What a URL means to the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    /// Direct product download link.
    Download {
        /// Identifier quoted inside `Products('...')`.
        product_id: String,
    },
    /// Product search query returning an OData feed.
    Search,
    /// Not a URL this portal serves.
    Unrecognized,
}

/// The portal base URL together with its compiled URL patterns.
#[derive(Debug, Clone)]
pub struct HubEndpoint {
    base_url: String,
    download_pattern: Regex,
    search_pattern: Regex,
}

impl HubEndpoint {
    /// Creates an endpoint for `base_url`, appending a trailing `/` if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUrl`] if the base URL is not an http(s)
    /// URL with a host.
    pub fn new(base_url: &str) -> Result<Self, ParseError> {
        let trimmed = base_url.trim();
        validate_url(trimmed)?;

        let base_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        let escaped = regex::escape(&format!("{base_url}{PRODUCTS_PATH}"));
        let download_pattern = Regex::new(&format!(r"^{escaped}\('(?P<id>[^']+)'\)/\$value"))
            .map_err(|e| ParseError::malformed(&base_url, &e.to_string()))?;
        let search_pattern = Regex::new(&format!(r"^{escaped}\?"))
            .map_err(|e| ParseError::malformed(&base_url, &e.to_string()))?;

        Ok(Self {
            base_url,
            download_pattern,
            search_pattern,
        })
    }

    /// Returns the normalized base URL (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classifies a URL against the endpoint patterns.
    #[must_use]
    pub fn classify(&self, url: &str) -> UrlKind {
        if let Some(captures) = self.download_pattern.captures(url)
            && let Some(id) = captures.name("id")
        {
            trace!(url, product_id = id.as_str(), "download URL");
            return UrlKind::Download {
                product_id: id.as_str().to_string(),
            };
        }

        if self.search_pattern.is_match(url) {
            trace!(url, "search URL");
            return UrlKind::Search;
        }

        UrlKind::Unrecognized
    }

    /// Builds a search URL from a raw OData query string (without leading `?`).
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{PRODUCTS_PATH}?{}",
            self.base_url,
            query.trim_start_matches('?')
        )
    }

    /// Builds the download URL for a product id.
    #[must_use]
    pub fn download_url(&self, product_id: &str) -> String {
        format!("{}{PRODUCTS_PATH}('{product_id}')/$value", self.base_url)
    }
}

impl Default for HubEndpoint {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base URL is valid") // Static value, safe to panic
    }
}
