use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Tenant Router Module
///
/// Every path here is inside the guarded pattern set.
///
/// Access Control:
/// * The three entry pages are public: anonymous visitors see them, signed-in
///   visitors are redirected to their home route.
/// * Client pages require a `client` session whose company and username match
///   the path; at most one ticket segment may follow the username.
/// * Agent pages require a `helper` session whose company and username match.
pub fn tenant_routes() -> Router<AppState> {
    Router::new()
        // --- Entry Pages ---
        .route("/company/{company_id}/clientlogin", get(handlers::client_login))
        .route("/company/{company_id}/clientregister", get(handlers::client_register))
        .route("/company/{company_id}/agentlogin", get(handlers::agent_login))
        // --- Client Pages ---
        .route(
            "/company/{company_id}/client/{client_id}",
            get(handlers::client_dashboard),
        )
        .route(
            "/company/{company_id}/client/{client_id}/{ticket_id}",
            get(handlers::client_ticket),
        )
        // --- Agent Pages ---
        .route(
            "/company/{company_id}/agent/{agent_id}",
            get(handlers::agent_dashboard),
        )
        .route(
            "/company/{company_id}/agent/{agent_id}/{ticket_id}",
            get(handlers::agent_ticket),
        )
}
