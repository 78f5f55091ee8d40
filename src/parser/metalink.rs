//! Metalink and OData search feed extraction.
//!
//! A metalink document (RFC 5854 / metalink v3) lists one or more `<url>`
//! elements per file. The portal's search feed embeds a complete, escaped
//! metalink document inside each entry's `d:Metalink` property.

use std::path::Path;

use tracing::{debug, instrument};

use super::error::ParseError;

/// Extracts every `url` element from a metalink document, in document order.
///
/// Element matching uses the local name only, so both the metalink 4
/// namespace and the older v3 namespace are accepted. Empty entries are
/// dropped and surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if `xml` is not well-formed.
#[instrument(level = "debug", skip(xml), fields(xml_len = xml.len()))]
pub fn extract_metalink_urls(xml: &str, source_name: &str) -> Result<Vec<String>, ParseError> {
    let urls = element_texts(xml, source_name, "url")?;
    debug!(count = urls.len(), "extracted metalink URLs");
    Ok(urls)
}

/// Extracts the embedded metalink documents from an OData search response.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if `xml` is not well-formed.
pub fn extract_search_metalinks(xml: &str, source_name: &str) -> Result<Vec<String>, ParseError> {
    element_texts(xml, source_name, "Metalink")
}

/// Returns every download URL referenced by an OData search response.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the response or any embedded metalink
/// document is not well-formed.
#[instrument(level = "debug", skip(xml), fields(xml_len = xml.len()))]
pub fn urls_from_search_response(xml: &str, source_name: &str) -> Result<Vec<String>, ParseError> {
    let mut urls = Vec::new();
    for metalink in extract_search_metalinks(xml, source_name)? {
        urls.extend(extract_metalink_urls(&metalink, source_name)?);
    }
    debug!(count = urls.len(), "extracted URLs from search response");
    Ok(urls)
}

/// Reads a metalink file and extracts its URLs.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the file cannot be read or parsed.
pub fn read_metalink_file(path: &Path) -> Result<Vec<String>, ParseError> {
    let source_name = path.display().to_string();
    let xml = std::fs::read_to_string(path).map_err(|e| ParseError::xml(&source_name, e))?;
    extract_metalink_urls(&xml, &source_name)
}

fn element_texts(xml: &str, source_name: &str, local_name: &str) -> Result<Vec<String>, ParseError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|e| ParseError::xml(source_name, e))?;

    let texts = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == local_name)
        .map(|node| {
            node.descendants()
                .filter(roxmltree::Node::is_text)
                .filter_map(|text| text.text())
                .collect::<String>()
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    Ok(texts)
}
