use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::auth::SessionToken;

/// PageKind
///
/// Every page the frontend renders behind or beside the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PageKind {
    Home,
    SignIn,
    Register,
    CompanyDirectory,
    NotFound,
    ClientLogin,
    ClientRegister,
    AgentLogin,
    AdminDashboard,
    AdminCompany,
    ClientDashboard,
    ClientTicket,
    AgentDashboard,
    AgentTicket,
}

/// Viewer
///
/// The session a page was served to, as admitted by the access gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Viewer {
    // Role tag as issued by the auth backend ("Admin", "client", "helper").
    pub role: String,
    pub identity: String,
    pub company_id: Option<String>,
}

impl From<&SessionToken> for Viewer {
    fn from(token: &SessionToken) -> Self {
        Self {
            role: token.role.as_str().to_string(),
            identity: token.identity.clone(),
            company_id: token.company_id.clone(),
        }
    }
}

/// PageView
///
/// Descriptor returned for a page route: which page, the route parameters it
/// was opened with, and who is looking at it. The UI itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PageView {
    pub page: PageKind,
    pub company_id: Option<String>,
    // Username segment of the route (admin, client or agent id).
    pub username: Option<String>,
    pub ticket_id: Option<String>,
    pub viewer: Option<Viewer>,
}

impl PageView {
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            company_id: None,
            username: None,
            ticket_id: None,
            viewer: None,
        }
    }

    pub fn company(mut self, company_id: String) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn ticket(mut self, ticket_id: String) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    pub fn viewed_by(mut self, session: Option<&SessionToken>) -> Self {
        self.viewer = session.map(Viewer::from);
        self
    }
}

/// ErrorBody
///
/// JSON body for unknown paths.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
    pub path: String,
}
