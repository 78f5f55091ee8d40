//! Classification of the positional command-line argument.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use super::error::ParseError;

/// The user-supplied URI after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubInput {
    /// A portal URL (search query or product download link).
    Url(String),
    /// A local metalink file listing product download links.
    MetalinkFile(PathBuf),
}

impl fmt::Display for HubInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::MetalinkFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Classifies the positional argument.
///
/// Anything that starts with `http://` or `https://` (lowercase, as the
/// portal hands links out) is validated as a URL.
/// Any other argument must name an existing file, which is then treated as
/// a metalink file.
///
/// # Errors
///
/// Returns [`ParseError::InvalidUrl`] for a bad URL, or
/// [`ParseError::NotFound`] when the argument is neither a URL nor an
/// existing file.
pub fn classify_input(arg: &str) -> Result<HubInput, ParseError> {
    let trimmed = arg.trim();

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let url = validate_url(trimmed)?;
        debug!(url = %url, "input classified as URL");
        return Ok(HubInput::Url(url));
    }

    let path = Path::new(trimmed);
    if !trimmed.is_empty() && path.is_file() {
        debug!(path = %path.display(), "input classified as metalink file");
        return Ok(HubInput::MetalinkFile(path.to_path_buf()));
    }

    Err(ParseError::not_found(arg))
}

/// Validates a URL string.
///
/// # Validation rules:
/// - Must be parseable by the `url` crate
/// - Must use http or https scheme
/// - Must have a host
///
/// The original string is returned unchanged so that product links keep the
/// exact form the portal handed out.
pub(crate) fn validate_url(raw: &str) -> Result<String, ParseError> {
    let parsed = Url::parse(raw).map_err(|e| ParseError::malformed(raw, &e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(ParseError::unsupported_scheme(raw, scheme)),
    }

    if parsed.host().is_none() {
        return Err(ParseError::no_host(raw));
    }

    Ok(raw.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_https_url() {
        let input = classify_input("https://scihub.esa.int/dhus/odata/v1/Products?$top=10").unwrap();
        assert_eq!(
            input,
            HubInput::Url("https://scihub.esa.int/dhus/odata/v1/Products?$top=10".to_string())
        );
    }

    #[test]
    fn test_classify_trims_surrounding_whitespace() {
        let input = classify_input("  https://scihub.esa.int/dhus/ ").unwrap();
        assert_eq!(input, HubInput::Url("https://scihub.esa.int/dhus/".to_string()));
    }

    #[test]
    fn test_classify_existing_file_as_metalink() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.meta4");
        std::fs::write(&path, "<metalink/>").unwrap();

        let input = classify_input(path.to_str().unwrap()).unwrap();
        assert_eq!(input, HubInput::MetalinkFile(path));
    }

    #[test]
    fn test_classify_missing_file_is_not_found() {
        let err = classify_input("no-such-cart.meta4").unwrap_err();
        assert!(matches!(err, ParseError::NotFound { .. }));
    }

    #[test]
    fn test_classify_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = classify_input(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::NotFound { .. }));
    }

    #[test]
    fn test_classify_empty_argument_is_not_found() {
        assert!(matches!(
            classify_input("").unwrap_err(),
            ParseError::NotFound { .. }
        ));
    }

    #[test]
    fn test_classify_malformed_url() {
        let err = classify_input("https://").unwrap_err();
        assert!(matches!(err, ParseError::InvalidUrl { .. }), "got: {err:?}");
    }

    #[test]
    fn test_classify_long_polygon_search_url() {
        let points: Vec<String> = (0..150)
            .map(|i| format!("{}.{:04} {}.{:04}", 10 + i % 20, i, 40 + i % 10, i))
            .collect();
        let query = format!(
            "$filter=footprint:\"Intersects(POLYGON(({})))\"",
            points.join(",")
        );
        let url = format!("https://scihub.esa.int/dhus/odata/v1/Products?{query}");
        assert!(url.len() > 2000);

        let input = classify_input(&url).unwrap();
        assert_eq!(input, HubInput::Url(url));
    }

    #[test]
    fn test_classify_uppercase_scheme_is_not_a_url() {
        let err = classify_input("HTTPS://scihub.esa.int/dhus/odata/v1/Products?$top=1").unwrap_err();
        assert!(matches!(err, ParseError::NotFound { .. }), "got: {err:?}");
    }

    #[test]
    fn test_validate_url_keeps_original_form() {
        let raw = "https://scihub.esa.int/dhus/odata/v1/Products('abc')/$value";
        assert_eq!(validate_url(raw).unwrap(), raw);
    }

    #[test]
    fn test_hub_input_display() {
        let url = HubInput::Url("https://example.com/".to_string());
        assert_eq!(url.to_string(), "https://example.com/");
        let file = HubInput::MetalinkFile(PathBuf::from("cart.meta4"));
        assert_eq!(file.to_string(), "cart.meta4");
    }
}
