//! Preview route handler
//!
//! Derives per-page metadata, loads the HTML shell, rewrites its meta
//! tags, and answers with the substituted document. Paths that fail to
//! parse are left to the caller to pass through upstream.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{error, warn};

use crate::preview::{
    apply_rules, load_shell, match_preview_route, preview_rules, PageMeta, PreviewRoute,
};
use crate::server::AppState;

/// Handle a preview-eligible request.
///
/// `path` is the request path including any query string. Returns `None`
/// when it is not a preview route; the caller forwards the original
/// request to the upstream app.
pub async fn handle_preview_request(
    state: Arc<AppState>,
    path: &str,
) -> Option<Response<Full<Bytes>>> {
    let route = match match_preview_route(path) {
        Some(route) => route,
        None => {
            error!(path = %path, "Could not parse preview URL, passing through");
            return None;
        }
    };

    let meta = resolve_meta(&state, &route).await;
    Some(render_preview(&state, &meta).await)
}

/// Compute display metadata for a route.
///
/// Concept pages start from the slug-derived fallback; a successful fetch
/// overwrites title and description, a failed fetch keeps the fallback.
async fn resolve_meta(state: &AppState, route: &PreviewRoute) -> PageMeta {
    match route {
        PreviewRoute::User { username } => PageMeta::for_user(username, &state.args.og_image_url),
        PreviewRoute::Concept { slug } => {
            let mut meta = PageMeta::for_concept(slug, &state.args.og_image_url);
            match state.concept_api.fetch_concept(slug).await {
                Ok(data) => meta.apply_concept_data(data),
                Err(e) => {
                    warn!(
                        slug = %slug,
                        error = %e,
                        "Concept metadata fetch failed, using slug-derived fallback"
                    );
                }
            }
            meta
        }
    }
}

/// Load the shell and apply the substitution rules
async fn render_preview(state: &AppState, meta: &PageMeta) -> Response<Full<Bytes>> {
    let shell = match load_shell(&state.args.shell_path).await {
        Ok(shell) => shell,
        Err(e) => {
            error!(error = %e, "Failed to load HTML shell");
            return shell_unavailable();
        }
    };

    let html = apply_rules(&shell, &preview_rules(meta));

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(html)))
        .unwrap()
}

fn shell_unavailable() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(
            r#"{"error": "Shell template unavailable"}"#,
        )))
        .unwrap()
}
