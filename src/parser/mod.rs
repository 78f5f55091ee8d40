//! Input parsing: command-line URI classification, portal URL patterns,
//! and metalink extraction.
//!
//! # Example
//!
//! ```
//! use sentinel_dl::parser::{HubEndpoint, UrlKind};
//!
//! let endpoint = HubEndpoint::default();
//! let kind = endpoint.classify("https://scihub.esa.int/dhus/odata/v1/Products?$top=10");
//! assert_eq!(kind, UrlKind::Search);
//! ```

mod endpoint;
mod error;
mod input;
mod metalink;

pub use endpoint::{DEFAULT_BASE_URL, HubEndpoint, UrlKind};
pub use error::ParseError;
pub use input::{HubInput, classify_input};
pub use metalink::{
    extract_metalink_urls, extract_search_metalinks, read_metalink_file,
    urls_from_search_response,
};
