use std::time::Duration;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::model::GeoInfo;

const DEFAULT_BASE_URL: &str = "http://ip-api.com/json";

/// IP geolocation lookup against ip-api.com.
///
/// Every failure mode (network error, timeout, non-2xx, lookup rejected by
/// the service) comes back as `AppError::Geo`; the caller decides what to
/// substitute. The lookup never affects the response to the visitor.
#[derive(Clone)]
pub struct GeoService {
    client: reqwest::Client,
    base_url: String,
}

impl GeoService {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(timeout, DEFAULT_BASE_URL)
    }

    /// Base URL is injectable so tests can point at a local stub.
    pub fn with_base_url(timeout: Duration, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn lookup(&self, ip: &str) -> Result<GeoInfo> {
        let url = format!("{}/{}", self.base_url, ip);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Geo(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(AppError::Geo(format!("HTTP {}", resp.status())));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Geo(format!("invalid response body: {}", e)))?;

        if body["status"].as_str() != Some("success") {
            let message = body["message"].as_str().unwrap_or("lookup rejected");
            return Err(AppError::Geo(message.to_string()));
        }

        Ok(GeoInfo {
            city: body["city"].as_str().map(|s| s.to_string()),
            region: body["regionName"].as_str().map(|s| s.to_string()),
            country: body["country"].as_str().map(|s| s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Minimal one-shot HTTP server returning a canned JSON body.
    async fn spawn_stub(body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let resp = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(resp.as_bytes()).await;
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let base = spawn_stub(
            r#"{"status":"success","city":"Paris","regionName":"IDF","country":"FR"}"#,
        )
        .await;
        let service = GeoService::with_base_url(Duration::from_secs(2), base).unwrap();

        let info = service.lookup("1.2.3.4").await.unwrap();
        assert_eq!(info.city.as_deref(), Some("Paris"));
        assert_eq!(info.region.as_deref(), Some("IDF"));
        assert_eq!(info.country.as_deref(), Some("FR"));
    }

    #[tokio::test]
    async fn test_lookup_rejected_status() {
        let base = spawn_stub(r#"{"status":"fail","message":"private range"}"#).await;
        let service = GeoService::with_base_url(Duration::from_secs(2), base).unwrap();

        let err = service.lookup("192.168.1.1").await.unwrap_err();
        assert!(err.to_string().contains("private range"));
    }

    #[tokio::test]
    async fn test_lookup_network_error() {
        // Port 1 is unassigned; the connection is refused immediately.
        let service =
            GeoService::with_base_url(Duration::from_millis(500), "http://127.0.0.1:1").unwrap();
        assert!(service.lookup("1.2.3.4").await.is_err());
    }
}
