//! API request handlers
//!
//! This module contains the request handlers for all endpoints.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::{debug, error, warn};

use crate::api::models::{AppConfig, MetadataPayload};
use crate::api::routes::ApiDoc;
use crate::dao::CsvLog;
use crate::model::{ClientMetadata, LogRow, VisitRecord, UNKNOWN};
use crate::service::{GeoService, VisitStore};

const REDIRECT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Redirecting...</title></head>
<body>
<p>Redirecting, please wait...</p>
<script>
  function sendData() {
    fetch("/log_additional", {
      method: "POST",
      headers: {"Content-Type": "application/json"},
      body: JSON.stringify({
        timezone: Intl.DateTimeFormat().resolvedOptions().timeZone,
        language: navigator.language,
        screen: screen.width + "x" + screen.height
      })
    }).finally(() => {
      window.location.href = {target_url};
    });
  }
  sendData();
</script>
</body>
</html>
"#;

/// First phase: capture the server-visible attributes, then serve the page
/// whose script posts the browser-only ones back before redirecting.
pub async fn index(
    req: HttpRequest,
    store: web::Data<VisitStore>,
    geo: web::Data<Option<GeoService>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let ip = client_ip(&req);
    let user_agent = req
        .headers()
        .get("User-Agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_string();

    let geo_info = match geo.get_ref() {
        Some(service) => match service.lookup(&ip).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Geolocation lookup failed for {}: {}", ip, e);
                None
            }
        },
        None => None,
    };

    debug!("Captured visit from {} ({})", ip, user_agent);
    store.insert(&ip, VisitRecord::new(ip.clone(), user_agent, geo_info));

    let page = REDIRECT_PAGE.replace("{target_url}", &js_string(&config.target_url));
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

/// Second phase: correlate the browser-reported metadata with the stored
/// first-phase record and append one log row. Always 204, whatever happens.
pub async fn log_additional(
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<VisitStore>,
    log: web::Data<CsvLog>,
) -> impl Responder {
    let payload: MetadataPayload = serde_json::from_slice(&body).unwrap_or_default();
    let client = ClientMetadata::new(payload.timezone, payload.language, payload.screen);

    let ip = client_ip(&req);
    match store.get(&ip) {
        Some(visit) => {
            let row = LogRow::new(visit, client);
            if let Err(e) = log.append(&row) {
                error!("Failed to append log row for {}: {}", ip, e);
            }
        }
        None => debug!("No pending visit for {}, dropping metadata", ip),
    }

    HttpResponse::NoContent().finish()
}

/// Render the whole log file as an HTML table.
pub async fn view_logs(log: web::Data<CsvLog>) -> impl Responder {
    let body = match log.read_all() {
        Ok(Some((header, rows))) => render_table(&header, &rows),
        Ok(None) => "<p>No data collected yet.</p>".to_string(),
        Err(e) => {
            error!("Failed to read log file: {}", e);
            "<p>No data collected yet.</p>".to_string()
        }
    };

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub async fn openapi_json() -> impl Responder {
    let doc = ApiDoc::openapi();
    let json = serde_json::to_string(&doc).unwrap_or_else(|_| "{}".to_string());
    HttpResponse::Ok()
        .content_type("application/json")
        .body(json)
}

/// X-Forwarded-For first value, falling back to the socket peer address.
fn client_ip(req: &HttpRequest) -> String {
    req.headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Quote a value as a JavaScript string literal for the redirect page.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("\\u003c"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table border='1'><tr>");
    for cell in header {
        html.push_str(&format!("<th>{}</th>", escape_html(cell)));
    }
    html.push_str("</tr>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
