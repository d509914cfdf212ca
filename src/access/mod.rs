//! Access Rules Module
//!
//! The pure decision table behind the gate middleware. Nothing in here performs
//! I/O: the caller supplies the request path and the already-decoded session
//! (or its absence), and receives a `Decision`.

use crate::auth::{Role, SessionToken};

pub mod path;

pub use path::{EntryKind, RoutePath};

/// Prefix under which the frontend framework serves its own bundles.
pub const ASSET_PREFIX: &str = "/_next";
/// Prefix of the external auth provider's callback endpoints.
pub const AUTH_CALLBACK_PREFIX: &str = "/api/auth";

pub const SIGN_IN_PATH: &str = "/signin";
pub const NOT_FOUND_PATH: &str = "/not-found";

/// Visibility
///
/// Result of `classify`. Public pages are the tenant login/registration
/// entries; everything else requires a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Restricted,
}

/// RedirectTarget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The session's own dashboard.
    Home(String),
    NotFound,
    SignIn,
}

impl RedirectTarget {
    pub fn path(&self) -> &str {
        match self {
            RedirectTarget::Home(path) => path,
            RedirectTarget::NotFound => NOT_FOUND_PATH,
            RedirectTarget::SignIn => SIGN_IN_PATH,
        }
    }
}

/// Decision
///
/// The only two outcomes of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(RedirectTarget),
}

/// is_bypassed
///
/// Asset bundles, auth callbacks, and anything whose final segment looks like
/// a file name are let through without looking at the session.
///
/// The file-name test looks only at the text of the path, so a page whose last
/// segment is a dotted username (`/admin/alice.smith`,
/// `/company/acme/client/alice.smith`) is bypassed as well and served to
/// anonymous visitors.
pub fn is_bypassed(path: &str) -> bool {
    path.starts_with(ASSET_PREFIX)
        || path.starts_with(AUTH_CALLBACK_PREFIX)
        || path::last_segment(path).contains('.')
}

/// is_guarded
///
/// Mirrors the fixed pattern set the gate is mounted on: the admin subtree,
/// the tenant client and agent subtrees, and the three tenant entry pages.
pub fn is_guarded(path: &str) -> bool {
    RoutePath::parse(path).is_guarded()
}

pub fn classify(path: &str) -> Visibility {
    if RoutePath::parse(path).is_entry() {
        Visibility::Public
    } else {
        Visibility::Restricted
    }
}

/// home_route
///
/// Canonical dashboard for a session. Tenant roles without a company, and
/// unrecognized roles, have no dashboard and land on `/`.
pub fn home_route(token: &SessionToken) -> String {
    match (&token.role, token.company_id.as_deref()) {
        (Role::Admin, _) => format!("/admin/{}", token.identity),
        (Role::Client, Some(company_id)) => {
            format!("/company/{}/client/{}", company_id, token.identity)
        }
        (Role::Helper, Some(company_id)) => {
            format!("/company/{}/agent/{}", company_id, token.identity)
        }
        (Role::Client | Role::Helper, None) | (Role::Unrecognized, _) => "/".to_string(),
    }
}

/// has_access
///
/// Ownership check for a session against a path.
///
/// * Admins may open anything under `/admin/`.
/// * Clients may open their own dashboard and a single ticket below it, inside
///   their own company only.
/// * Helpers (agents) may open anything under their own agent subtree inside
///   their own company.
pub fn has_access(path: &str, token: &SessionToken) -> bool {
    let route = RoutePath::parse(path);
    let own_company = |company_id: &str| token.company_id.as_deref() == Some(company_id);

    match token.role {
        Role::Admin => route.is_admin_scoped(),
        Role::Client => match route {
            RoutePath::Client {
                company_id,
                client_id,
                rest,
            } => {
                own_company(company_id)
                    && client_id == token.identity
                    && is_at_most_one_segment(rest)
            }
            _ => false,
        },
        Role::Helper => match route {
            RoutePath::Agent {
                company_id,
                agent_id,
                ..
            } => own_company(company_id) && agent_id == token.identity,
            _ => false,
        },
        Role::Unrecognized => false,
    }
}

/// `""` or `"/segment"` with a non-empty segment: the dashboard or one ticket.
fn is_at_most_one_segment(rest: &str) -> bool {
    match rest.strip_prefix('/') {
        None => rest.is_empty(),
        Some(segment) => !segment.is_empty() && !segment.contains('/'),
    }
}

/// decide
///
/// Top-level decision procedure, evaluated strictly in this order:
///
/// 1. Bypassed paths are allowed.
/// 2. With a session: public pages bounce to the session's home; `/admin/` is
///    reserved to admins; every other path needs `has_access`.
/// 3. Without a session: public pages are allowed, anything else goes to
///    sign-in.
///
/// An undecodable session must be passed in as `None`.
pub fn decide(path: &str, token: Option<&SessionToken>) -> Decision {
    if is_bypassed(path) {
        return Decision::Allow;
    }

    let visibility = classify(path);

    match token {
        Some(token) => {
            if visibility == Visibility::Public {
                return Decision::Redirect(RedirectTarget::Home(home_route(token)));
            }

            let admin_scoped = RoutePath::parse(path).is_admin_scoped();
            if admin_scoped && token.role != Role::Admin {
                return Decision::Redirect(RedirectTarget::NotFound);
            }
            if !admin_scoped && !has_access(path, token) {
                return Decision::Redirect(RedirectTarget::NotFound);
            }

            Decision::Allow
        }
        None => match visibility {
            Visibility::Public => Decision::Allow,
            Visibility::Restricted => Decision::Redirect(RedirectTarget::SignIn),
        },
    }
}
