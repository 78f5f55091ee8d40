//! Portal authentication.
//!
//! Credentials are read from a local file and sent with every request as
//! HTTP basic authentication.

mod credentials;

pub use credentials::{Credentials, CredentialsError, DEFAULT_CREDENTIALS_FILE};
