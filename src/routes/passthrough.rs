//! Pass-through forwarding to the upstream app
//!
//! Requests lintel does not handle keep their original semantics: they are
//! forwarded to the upstream app and the upstream response is mirrored
//! back, including status and cache headers.
//!
//! ```text
//! Browser → Lintel → upstream app
//!              │          │
//!         (forward)    (SPA host)
//! ```

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use tracing::{debug, warn};

/// Forward a request to the upstream app unchanged
pub async fn forward_to_upstream(
    req: Request<Incoming>,
    upstream_url: &str,
) -> Response<Full<Bytes>> {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let target_url = format!("{}{}", upstream_url.trim_end_matches('/'), path_and_query);

    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .unwrap_or(reqwest::Method::GET);

    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "Failed to read request body for forwarding");
            return Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error": "Failed to read request body"}"#,
                )))
                .unwrap();
        }
    };

    debug!(url = %target_url, "Forwarding request to upstream app");

    let client = reqwest::Client::new();
    let mut builder = client.request(method, &target_url);
    if let Some(ct) = content_type {
        builder = builder.header("Content-Type", ct);
    }
    if !body.is_empty() {
        builder = builder.body(body.to_vec());
    }

    match builder.send().await {
        Ok(response) => {
            let status = response.status();
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("text/html")
                .to_string();

            let cache_control = response
                .headers()
                .get("cache-control")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            let etag = response
                .headers()
                .get("etag")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            match response.bytes().await {
                Ok(body) => {
                    debug!(
                        status = %status,
                        size = body.len(),
                        url = %target_url,
                        "Forwarded upstream response"
                    );

                    let mut builder = Response::builder()
                        .status(StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK))
                        .header("Content-Type", content_type);

                    if let Some(cc) = cache_control {
                        builder = builder.header("Cache-Control", cc);
                    }

                    if let Some(et) = etag {
                        builder = builder.header("ETag", et);
                    }

                    builder.body(Full::new(Bytes::from(body.to_vec()))).unwrap()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read upstream response body");
                    bad_gateway(&format!("Failed to read upstream response: {}", e))
                }
            }
        }
        Err(e) => {
            warn!(error = %e, url = %target_url, "Failed to forward to upstream app");
            bad_gateway(&format!("Failed to connect to upstream app: {}", e))
        }
    }
}

fn bad_gateway(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Bad Gateway",
        "message": message,
    });

    Response::builder()
        .status(StatusCode::BAD_GATEWAY)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
