//! Request logging
//!
//! Buffers each response body once so the exit line can say what was served.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use http::StatusCode;
use http_body_util::BodyExt;
use tracing::{warn, Instrument};

use crate::logging::{RequestSpan, TraceContext};

/// Responses larger than this are not parsed for a summary (1MB)
const MAX_SUMMARY_BODY_SIZE: usize = 1024 * 1024;

/// Summarize a registry JSON response in a few words
///
/// - lists: `servers: N`
/// - single records: `server: name@version`
/// - errors: `error: label`
pub fn summarize_response(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || bytes.len() > MAX_SUMMARY_BODY_SIZE {
        return None;
    }
    let json: serde_json::Value = serde_json::from_slice(bytes).ok()?;

    if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
        return Some(format!("error: {}", error));
    }

    if let Some(servers) = json.get("servers").and_then(|s| s.as_array()) {
        return Some(format!("servers: {}", servers.len()));
    }

    if let Some(server) = json.get("server") {
        let name = server.get("name").and_then(|n| n.as_str()).unwrap_or("?");
        let version = server.get("version").and_then(|v| v.as_str()).unwrap_or("?");
        return Some(format!("server: {}@{}", name, version));
    }

    json.get("status")
        .and_then(|s| s.as_str())
        .map(|s| format!("status: {}", s))
}

pub async fn http_logging_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let ctx = TraceContext::new(request.method().as_str(), request.uri().path())
        .with_query(request.uri().query());
    let span = RequestSpan::enter(&ctx);

    async move {
        RequestSpan::log_entry(&ctx);

        let response = next.run(request).await;

        let (parts, body) = response.into_parts();
        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!("Failed to read response body: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        let summary = summarize_response(&body_bytes);
        RequestSpan::log_exit(&ctx, parts.status.as_u16(), summary.as_deref());

        Ok(Response::from_parts(parts, Body::from(body_bytes)))
    }
    .instrument(span)
    .await
}
