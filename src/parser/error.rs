//! Error types for input parsing operations.

use thiserror::Error;

/// Errors that can occur while interpreting the command-line input.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// URL is malformed or uses unsupported scheme
    #[error("invalid URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidUrl {
        /// The URL that failed validation
        url: String,
        /// Why the URL is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Argument is neither a URL nor an existing file.
    #[error("can't find file or link {input}")]
    NotFound {
        /// The argument as given on the command line.
        input: String,
    },

    /// XML document (metalink file or search response) could not be parsed.
    #[error("malformed XML in {source_name}: {reason}")]
    Xml {
        /// Where the document came from (file path or URL).
        source_name: String,
        /// Parser error message.
        reason: String,
    },
}

impl ParseError {
    /// Creates an `InvalidUrl` error for a non-web URL scheme.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: format!("scheme '{scheme}' is not supported"),
            suggestion: "Use http:// or https:// URLs".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a malformed URL.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Check the URL format and try again".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL without a host.
    #[must_use]
    pub fn no_host(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
            suggestion: "Ensure the URL includes the portal host".to_string(),
        }
    }

    /// Creates a `NotFound` error for an argument that is neither URL nor file.
    #[must_use]
    pub fn not_found(input: &str) -> Self {
        Self::NotFound {
            input: input.to_string(),
        }
    }

    /// Creates an `Xml` error for a document that failed to parse.
    #[must_use]
    pub fn xml(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Xml {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_unsupported_scheme_message() {
        let err = ParseError::unsupported_scheme("ftp://example.com", "ftp");
        let msg = err.to_string();
        assert!(msg.contains("ftp://example.com"), "should contain URL");
        assert!(msg.contains("http://"), "suggestion should mention http");
    }

    #[test]
    fn test_parse_error_no_host_message() {
        let err = ParseError::no_host("http:///path");
        assert!(err.to_string().contains("no host"));
    }

    #[test]
    fn test_parse_error_not_found_message() {
        let msg = ParseError::not_found("products.meta4").to_string();
        assert_eq!(msg, "can't find file or link products.meta4");
    }

    #[test]
    fn test_parse_error_xml_message() {
        let msg = ParseError::xml("cart.meta4", "unexpected end of stream").to_string();
        assert!(msg.contains("cart.meta4"));
        assert!(msg.contains("unexpected end of stream"));
    }
}
