//! API data models
//!
//! Request payloads and shared handler configuration.

use serde::Deserialize;

/// Fixed configuration shared with the handlers
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL visitors are forwarded to after the capture round trip
    pub target_url: String,
}

/// Body of the second-phase capture call.
///
/// Every field is optional; missing or malformed input degrades to
/// "Unknown" values rather than an error response.
#[derive(Debug, Default, Deserialize)]
pub struct MetadataPayload {
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub screen: Option<String>,
}
