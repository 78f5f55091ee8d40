//! Sentinel download library
//!
//! This library provides the core functionality for `sentinel-dl`, which
//! authenticates against the scihub data portal, resolves a search query,
//! product link or metalink file into product URLs, and streams the products
//! to local disk.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - Credentials file loading
//! - [`parser`] - Input classification, portal URL patterns, metalink parsing
//! - [`download`] - Authenticated HTTP client and sequential download engine

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod download;
pub mod parser;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use auth::{Credentials, CredentialsError, DEFAULT_CREDENTIALS_FILE};
pub use download::{
    ClientSettings, DownloadEngine, DownloadError, DownloadOutcome, DownloadStats, HubClient,
    ProgressReporter,
};
pub use parser::{DEFAULT_BASE_URL, HubEndpoint, HubInput, ParseError, UrlKind, classify_input};
