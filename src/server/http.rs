//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling: a TCP accept loop,
//! one `service_fn` per connection, and a single `(Method, path)` match
//! routing every request.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::MongoClient;
use crate::routes;
use crate::services::ConceptApi;
use crate::types::Result;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Database connection for the app data layer (None in dev mode
    /// without MongoDB)
    pub mongo: Option<MongoClient>,
    /// Client for the concept metadata API
    pub concept_api: ConceptApi,
    /// Process start time, reported as uptime by the health probes
    pub started_at: Instant,
}

impl AppState {
    /// Create AppState without a database connection
    pub fn new(args: Args) -> Self {
        let concept_api = ConceptApi::new(&args.api_url);
        Self {
            args,
            mongo: None,
            concept_api,
            started_at: Instant::now(),
        }
    }

    /// Create AppState with a connected database
    pub fn with_database(args: Args, mongo: MongoClient) -> Self {
        let concept_api = ConceptApi::new(&args.api_url);
        Self {
            args,
            mongo: Some(mongo),
            concept_api,
            started_at: Instant::now(),
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Lintel listening on {} as node {}",
        state.args.listen, state.args.node_id
    );
    info!("Forwarding unmatched requests to {}", state.args.upstream_url);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .preserve_header_case(true)
                        .title_case_headers(true)
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Liveness probe - returns 200 if lintel is running
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            to_boxed(routes::health_check(Arc::clone(&state)).await)
        }

        // Readiness probe - returns 200 only if the HTML shell is readable
        (Method::GET, "/ready") | (Method::GET, "/readyz") => {
            to_boxed(routes::readiness_check(Arc::clone(&state)).await)
        }

        // Version info for deployment verification
        (Method::GET, "/version") => to_boxed(routes::version_info()),

        // CORS preflight
        (Method::OPTIONS, _) => to_boxed(preflight_response()),

        // ====================================================================
        // Social link previews - profile and concept pages
        // Unparseable paths fall back to the upstream app
        // ====================================================================
        (Method::GET, p) if p.starts_with("/users/") || p.starts_with("/concepts/") => {
            // Preview matching sees the query string; `/users/a?x` is not a
            // preview route
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| p.to_string());
            match routes::handle_preview_request(Arc::clone(&state), &target).await {
                Some(response) => to_boxed(response),
                None => to_boxed(routes::forward_to_upstream(req, &state.args.upstream_url).await),
            }
        }

        // Everything else keeps its original semantics at the upstream app
        _ => to_boxed(routes::forward_to_upstream(req, &state.args.upstream_url).await),
    };

    Ok(response)
}

/// Convert a Full<Bytes> body to BoxBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}
