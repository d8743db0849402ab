use serde::{Deserialize, Serialize};

/// Geolocation fields resolved for a client IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoInfo {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}
