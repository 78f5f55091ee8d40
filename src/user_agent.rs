//! User-Agent string sent with every portal request.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/sentinel-dl/sentinel-dl";

/// Default User-Agent for portal requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("sentinel-dl/{version} (+{PROJECT_UA_URL})")
}
