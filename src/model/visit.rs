use chrono::Utc;

use crate::model::GeoInfo;

pub const UNKNOWN: &str = "Unknown";

/// Server-captured data from the first page load
#[derive(Debug, Clone)]
pub struct VisitRecord {
    pub timestamp: String,
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub user_agent: String,
}

impl VisitRecord {
    pub fn new(ip: String, user_agent: String, geo: Option<GeoInfo>) -> Self {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let geo = geo.unwrap_or_default();
        Self {
            timestamp,
            ip,
            city: geo.city.unwrap_or_else(|| UNKNOWN.to_string()),
            region: geo.region.unwrap_or_else(|| UNKNOWN.to_string()),
            country: geo.country.unwrap_or_else(|| UNKNOWN.to_string()),
            user_agent,
        }
    }
}

/// Browser-reported data from the second, asynchronous call
#[derive(Debug, Clone)]
pub struct ClientMetadata {
    pub timezone: String,
    pub language: String,
    pub screen: String,
}

impl ClientMetadata {
    pub fn new(timezone: Option<String>, language: Option<String>, screen: Option<String>) -> Self {
        Self {
            timezone: timezone.unwrap_or_else(|| UNKNOWN.to_string()),
            language: language.unwrap_or_else(|| UNKNOWN.to_string()),
            screen: screen.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// One completed visit, persisted as a single CSV record
#[derive(Debug, Clone)]
pub struct LogRow {
    pub visit: VisitRecord,
    pub client: ClientMetadata,
}

impl LogRow {
    pub fn new(visit: VisitRecord, client: ClientMetadata) -> Self {
        Self { visit, client }
    }

    /// Field values in the persisted column order
    pub fn fields(&self) -> [&str; 9] {
        [
            &self.visit.timestamp,
            &self.visit.ip,
            &self.visit.city,
            &self.visit.region,
            &self.visit.country,
            &self.visit.user_agent,
            &self.client.timezone,
            &self.client.language,
            &self.client.screen,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_record_defaults_missing_geo() {
        let record = VisitRecord::new("1.2.3.4".to_string(), "TestAgent/1.0".to_string(), None);
        assert_eq!(record.ip, "1.2.3.4");
        assert_eq!(record.city, UNKNOWN);
        assert_eq!(record.region, UNKNOWN);
        assert_eq!(record.country, UNKNOWN);
        assert!(record.timestamp.ends_with(" UTC"));
    }

    #[test]
    fn test_log_row_field_order() {
        let geo = GeoInfo {
            city: Some("Paris".to_string()),
            region: Some("IDF".to_string()),
            country: Some("FR".to_string()),
        };
        let visit = VisitRecord::new("1.2.3.4".to_string(), "TestAgent/1.0".to_string(), Some(geo));
        let client = ClientMetadata::new(
            Some("Europe/Paris".to_string()),
            Some("fr-FR".to_string()),
            Some("1920x1080".to_string()),
        );
        let row = LogRow::new(visit, client);

        let fields = row.fields();
        assert_eq!(
            &fields[1..],
            &["1.2.3.4", "Paris", "IDF", "FR", "TestAgent/1.0", "Europe/Paris", "fr-FR", "1920x1080"]
        );
    }

    #[test]
    fn test_client_metadata_defaults() {
        let client = ClientMetadata::new(None, Some("en-US".to_string()), None);
        assert_eq!(client.timezone, UNKNOWN);
        assert_eq!(client.language, "en-US");
        assert_eq!(client.screen, UNKNOWN);
    }
}
