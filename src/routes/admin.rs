use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Pages under `/admin/`. The gate admits any `Admin` session here; the
/// username segment is not compared with the session identity.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/{username}
        // The admin's organization list.
        .route("/admin/{username}", get(handlers::admin_dashboard))
        // GET /admin/{username}/{company_id}
        // One organization: agents, clients and tickets.
        .route(
            "/admin/{username}/{company_id}",
            get(handlers::admin_company),
        )
}
