use crate::{
    auth::CurrentSession,
    models::{ErrorBody, PageKind, PageView},
};
use axum::{
    Json,
    extract::Path,
    http::{StatusCode, Uri},
    response::IntoResponse,
};

// --- Unguarded Pages ---

/// home
///
/// [Public Route] Landing page.
#[utoipa::path(get, path = "/", responses((status = 200, description = "Landing page", body = PageView)))]
pub async fn home() -> Json<PageView> {
    Json(PageView::new(PageKind::Home))
}

/// sign_in
///
/// [Public Route] Target of every anonymous redirect off a restricted page.
#[utoipa::path(get, path = "/signin", responses((status = 200, description = "Sign-in page", body = PageView)))]
pub async fn sign_in() -> Json<PageView> {
    Json(PageView::new(PageKind::SignIn))
}

/// register
///
/// [Public Route] Company registration, used by company admins.
#[utoipa::path(get, path = "/register", responses((status = 200, description = "Company registration page", body = PageView)))]
pub async fn register() -> Json<PageView> {
    Json(PageView::new(PageKind::Register))
}

/// company_directory
///
/// [Public Route] Company picker that leads to the tenant entry pages.
#[utoipa::path(get, path = "/company", responses((status = 200, description = "Company directory", body = PageView)))]
pub async fn company_directory() -> Json<PageView> {
    Json(PageView::new(PageKind::CompanyDirectory))
}

/// not_found
///
/// [Public Route] Target of every denied authenticated request.
#[utoipa::path(get, path = "/not-found", responses((status = 404, description = "Not found page", body = PageView)))]
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(PageView::new(PageKind::NotFound)))
}

/// fallback
///
/// Any path without a page. Returns a plain JSON 404 rather than redirecting.
pub async fn fallback(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}

// --- Tenant Entry Pages (public, anonymous only) ---

/// client_login
///
/// [Entry Route] Client sign-in for one company. Signed-in visitors are sent
/// to their home route by the gate before reaching this handler.
#[utoipa::path(
    get,
    path = "/company/{company_id}/clientlogin",
    params(("company_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Client login page", body = PageView),
        (status = 307, description = "Already signed in, redirected home")
    )
)]
pub async fn client_login(Path(company_id): Path<String>) -> Json<PageView> {
    Json(PageView::new(PageKind::ClientLogin).company(company_id))
}

/// client_register
///
/// [Entry Route] Client self-registration for one company.
#[utoipa::path(
    get,
    path = "/company/{company_id}/clientregister",
    params(("company_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Client registration page", body = PageView),
        (status = 307, description = "Already signed in, redirected home")
    )
)]
pub async fn client_register(Path(company_id): Path<String>) -> Json<PageView> {
    Json(PageView::new(PageKind::ClientRegister).company(company_id))
}

/// agent_login
///
/// [Entry Route] Agent (helper) sign-in for one company.
#[utoipa::path(
    get,
    path = "/company/{company_id}/agentlogin",
    params(("company_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Agent login page", body = PageView),
        (status = 307, description = "Already signed in, redirected home")
    )
)]
pub async fn agent_login(Path(company_id): Path<String>) -> Json<PageView> {
    Json(PageView::new(PageKind::AgentLogin).company(company_id))
}

// --- Admin Pages ---

/// admin_dashboard
///
/// [Admin Route] Organization list for a company admin.
#[utoipa::path(
    get,
    path = "/admin/{username}",
    params(("username" = String, Path, description = "Admin username")),
    responses(
        (status = 200, description = "Admin dashboard", body = PageView),
        (status = 307, description = "Anonymous or non-admin session")
    )
)]
pub async fn admin_dashboard(
    CurrentSession(session): CurrentSession,
    Path(username): Path<String>,
) -> Json<PageView> {
    Json(
        PageView::new(PageKind::AdminDashboard)
            .username(username)
            .viewed_by(session.as_ref()),
    )
}

/// admin_company
///
/// [Admin Route] A single organization managed by the admin.
#[utoipa::path(
    get,
    path = "/admin/{username}/{company_id}",
    params(
        ("username" = String, Path, description = "Admin username"),
        ("company_id" = String, Path, description = "Tenant id")
    ),
    responses(
        (status = 200, description = "Admin company page", body = PageView),
        (status = 307, description = "Anonymous or non-admin session")
    )
)]
pub async fn admin_company(
    CurrentSession(session): CurrentSession,
    Path((username, company_id)): Path<(String, String)>,
) -> Json<PageView> {
    Json(
        PageView::new(PageKind::AdminCompany)
            .username(username)
            .company(company_id)
            .viewed_by(session.as_ref()),
    )
}

// --- Tenant Pages ---

/// client_dashboard
///
/// [Tenant Route] A client's ticket list and assistant chat.
#[utoipa::path(
    get,
    path = "/company/{company_id}/client/{client_id}",
    params(
        ("company_id" = String, Path, description = "Tenant id"),
        ("client_id" = String, Path, description = "Client username")
    ),
    responses(
        (status = 200, description = "Client dashboard", body = PageView),
        (status = 307, description = "Anonymous or not the owning client")
    )
)]
pub async fn client_dashboard(
    CurrentSession(session): CurrentSession,
    Path((company_id, client_id)): Path<(String, String)>,
) -> Json<PageView> {
    Json(
        PageView::new(PageKind::ClientDashboard)
            .company(company_id)
            .username(client_id)
            .viewed_by(session.as_ref()),
    )
}

/// client_ticket
///
/// [Tenant Route] One ticket conversation, client side.
#[utoipa::path(
    get,
    path = "/company/{company_id}/client/{client_id}/{ticket_id}",
    params(
        ("company_id" = String, Path, description = "Tenant id"),
        ("client_id" = String, Path, description = "Client username"),
        ("ticket_id" = String, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Client ticket page", body = PageView),
        (status = 307, description = "Anonymous or not the owning client")
    )
)]
pub async fn client_ticket(
    CurrentSession(session): CurrentSession,
    Path((company_id, client_id, ticket_id)): Path<(String, String, String)>,
) -> Json<PageView> {
    Json(
        PageView::new(PageKind::ClientTicket)
            .company(company_id)
            .username(client_id)
            .ticket(ticket_id)
            .viewed_by(session.as_ref()),
    )
}

/// agent_dashboard
///
/// [Tenant Route] An agent's assigned tickets.
#[utoipa::path(
    get,
    path = "/company/{company_id}/agent/{agent_id}",
    params(
        ("company_id" = String, Path, description = "Tenant id"),
        ("agent_id" = String, Path, description = "Agent username")
    ),
    responses(
        (status = 200, description = "Agent dashboard", body = PageView),
        (status = 307, description = "Anonymous or not the owning agent")
    )
)]
pub async fn agent_dashboard(
    CurrentSession(session): CurrentSession,
    Path((company_id, agent_id)): Path<(String, String)>,
) -> Json<PageView> {
    Json(
        PageView::new(PageKind::AgentDashboard)
            .company(company_id)
            .username(agent_id)
            .viewed_by(session.as_ref()),
    )
}

/// agent_ticket
///
/// [Tenant Route] One ticket conversation, agent side.
#[utoipa::path(
    get,
    path = "/company/{company_id}/agent/{agent_id}/{ticket_id}",
    params(
        ("company_id" = String, Path, description = "Tenant id"),
        ("agent_id" = String, Path, description = "Agent username"),
        ("ticket_id" = String, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Agent ticket page", body = PageView),
        (status = 307, description = "Anonymous or not the owning agent")
    )
)]
pub async fn agent_ticket(
    CurrentSession(session): CurrentSession,
    Path((company_id, agent_id, ticket_id)): Path<(String, String, String)>,
) -> Json<PageView> {
    Json(
        PageView::new(PageKind::AgentTicket)
            .company(company_id)
            .username(agent_id)
            .ticket(ticket_id)
            .viewed_by(session.as_ref()),
    )
}
