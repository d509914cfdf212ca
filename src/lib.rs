use axum::{Router, extract::FromRef, http::HeaderName, middleware};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Pure access rules: route shapes, classification, ownership, decision.
pub mod access;
// Session token model and the decoder seam to the auth backend.
pub mod auth;
pub mod config;
pub mod handlers;
// The axum middleware applying the access rules.
pub mod gate;
pub mod models;

// Page routes grouped by how the gate treats them (Public, Tenant, Admin).
pub mod routes;
use routes::{admin, public, tenant};

// --- Public Re-exports ---

pub use auth::{JwtSessionDecoder, SessionDecoder, SessionDecoderState, SessionToken};
pub use config::AppConfig;

/// ApiDoc
///
/// OpenAPI description of the page tree, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home, handlers::sign_in, handlers::register, handlers::company_directory,
        handlers::not_found, handlers::client_login, handlers::client_register,
        handlers::agent_login, handlers::admin_dashboard, handlers::admin_company,
        handlers::client_dashboard, handlers::client_ticket, handlers::agent_dashboard,
        handlers::agent_ticket
    ),
    components(
        schemas(models::PageView, models::PageKind, models::Viewer, models::ErrorBody)
    ),
    tags(
        (name = "supportflow-gate", description = "SupportFlow page access gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// Immutable state shared by every request: the session decoder and the
/// loaded configuration.
#[derive(Clone)]
pub struct AppState {
    /// Decodes the session presented with a request (JWT in production).
    pub sessions: SessionDecoderState,
    pub config: AppConfig,
}

impl AppState {
    /// State backed by the JWT decoder for the given configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let sessions = Arc::new(JwtSessionDecoder::from_config(&config)) as SessionDecoderState;
        Self { sessions, config }
    }
}

// The access gate pulls the decoder and the configuration out separately.
impl FromRef<AppState> for SessionDecoderState {
    fn from_ref(app_state: &AppState) -> SessionDecoderState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the page tree, mounts the access gate over all of it, and wraps
/// the result in the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(tenant::tenant_routes())
        .merge(admin::admin_routes())
        .fallback(handlers::fallback)
        // The gate sees every request, including ones that end in the fallback;
        // it passes anything outside the guarded pattern set untouched.
        .layer(middleware::from_fn_with_state(state.clone(), gate::access_gate))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer`, carrying the request id so every log line of a
/// request (including the gate's decision) is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
