//! Credentials file loader.
//!
//! The credentials file holds a single line `USER:PASSWORD` with the portal
//! account used for HTTP basic authentication.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

/// Default credentials file name, resolved relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = ".credentials";

/// Account credentials for the data portal.
///
/// The password is redacted in Debug output to prevent accidental logging.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credentials pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the account user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account password.
    ///
    /// Sensitive: avoid logging the return value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parses credentials from the contents of a credentials file.
    ///
    /// Only the first line is read. Surrounding whitespace is trimmed and the
    /// line is split on the first `:`, so passwords may themselves contain `:`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::Malformed`] when the first line is empty,
    /// has no `:` separator, or either side of it is empty.
    pub fn parse(text: &str) -> Result<Self, CredentialsError> {
        let line = text.lines().next().map_or("", str::trim);
        if line.is_empty() {
            return Err(CredentialsError::malformed("first line is empty"));
        }

        let Some((username, password)) = line.split_once(':') else {
            return Err(CredentialsError::malformed("missing ':' separator"));
        };

        if username.is_empty() {
            return Err(CredentialsError::malformed("user name is empty"));
        }
        if password.is_empty() {
            return Err(CredentialsError::malformed("password is empty"));
        }

        Ok(Self::new(username, password))
    }

    /// Reads and parses a credentials file.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::Read`] if the file cannot be read, or
    /// [`CredentialsError::InvalidFile`] if its first line is malformed.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let text = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let credentials = Self::parse(&text).map_err(|e| match e {
            CredentialsError::Malformed { reason } => CredentialsError::InvalidFile {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        debug!(username = %credentials.username, "loaded credentials");
        Ok(credentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Errors that can occur while loading credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    /// The credentials file could not be read.
    #[error(
        "can't read credentials file {path}: {source}\n  Suggestion: create it with one line containing USER:PASSWORD"
    )]
    Read {
        /// Path of the credentials file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The credentials file exists but its first line is malformed.
    #[error(
        "invalid credentials file {path}: {reason}\n  Suggestion: the file should contain one line with USER:PASSWORD"
    )]
    InvalidFile {
        /// Path of the credentials file.
        path: PathBuf,
        /// Description of what was wrong.
        reason: String,
    },

    /// Credentials text is malformed.
    #[error("invalid credentials: {reason}")]
    Malformed {
        /// Description of what was wrong.
        reason: String,
    },
}

impl CredentialsError {
    fn malformed(reason: &str) -> Self {
        Self::Malformed {
            reason: reason.to_string(),
        }
    }
}
