use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Pages the gate never inspects. Redirect targets (`/signin`, `/not-found`)
/// must live here so a redirect can never loop back into the gate.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        .route("/", get(handlers::home))
        .route("/signin", get(handlers::sign_in))
        .route("/not-found", get(handlers::not_found))
        // GET /register
        // Company registration for new company admins.
        .route("/register", get(handlers::register))
        .route("/company", get(handlers::company_directory))
}
