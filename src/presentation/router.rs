use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::ServerSettings;
use crate::presentation::handlers::{health_handler, process_documents_handler, root_handler};
use crate::presentation::state::AppState;

const BYTES_PER_MB: usize = 1024 * 1024;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + ?Sized + 'static,
{
    let server = &state.settings.server;
    let cors = cors_layer(server);
    let body_limit = DefaultBodyLimit::max(server.max_upload_size_mb.saturating_mul(BYTES_PER_MB));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/process-documents", post(process_documents_handler::<L>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// Restricts CORS to the configured origin; without one every origin is
/// allowed.
fn cors_layer(server: &ServerSettings) -> CorsLayer {
    let origin = server
        .cors_origin
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty());

    match origin {
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
            Err(e) => {
                tracing::warn!(
                    origin,
                    error = %e,
                    "Invalid CORS origin, denying cross-origin requests"
                );
                CorsLayer::new()
            }
        },
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}
