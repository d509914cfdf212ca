//! Route Shape Parser
//!
//! Every access check in the gate looks at the same handful of path shapes:
//! the admin subtree, the three tenant entry pages, and the tenant-scoped
//! client and agent subtrees. `RoutePath` decomposes a raw path into one of
//! those shapes exactly once, so classification, ownership checks and the
//! matcher cannot drift apart.

/// EntryKind
///
/// The tenant-scoped pages an anonymous visitor may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    ClientLogin,
    ClientRegister,
    AgentLogin,
}

impl EntryKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "clientlogin" => Some(EntryKind::ClientLogin),
            "clientregister" => Some(EntryKind::ClientRegister),
            "agentlogin" => Some(EntryKind::AgentLogin),
            _ => None,
        }
    }
}

/// RoutePath
///
/// A borrowed view over a request path. Identifier fields are never empty.
/// `rest` holds whatever follows the identity segment verbatim, including its
/// leading slash (empty when the path ends at the identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePath<'a> {
    /// `/admin` (scoped = false) or anything under `/admin/` (scoped = true).
    Admin { scoped: bool },
    /// `/company/{company_id}/clientlogin|clientregister|agentlogin`, exact.
    Entry {
        company_id: &'a str,
        kind: EntryKind,
    },
    /// `/company/{company_id}/client/{client_id}...`
    Client {
        company_id: &'a str,
        client_id: &'a str,
        rest: &'a str,
    },
    /// `/company/{company_id}/agent/{agent_id}...`
    Agent {
        company_id: &'a str,
        agent_id: &'a str,
        rest: &'a str,
    },
    /// Anything else.
    Unguarded,
}

impl<'a> RoutePath<'a> {
    pub fn parse(path: &'a str) -> Self {
        if path == "/admin" {
            return RoutePath::Admin { scoped: false };
        }
        if path.starts_with("/admin/") {
            return RoutePath::Admin { scoped: true };
        }

        let Some(tail) = path.strip_prefix("/company/") else {
            return RoutePath::Unguarded;
        };
        let Some((company_id, tail)) = split_segment(tail) else {
            return RoutePath::Unguarded;
        };

        // Entry pages are matched exactly: no trailing slash, nothing after.
        if let Some(kind) = EntryKind::from_segment(tail) {
            return RoutePath::Entry { company_id, kind };
        }

        if let Some(tail) = tail.strip_prefix("client/") {
            if let Some((client_id, rest)) = identity_and_rest(tail) {
                return RoutePath::Client {
                    company_id,
                    client_id,
                    rest,
                };
            }
        } else if let Some(tail) = tail.strip_prefix("agent/") {
            if let Some((agent_id, rest)) = identity_and_rest(tail) {
                return RoutePath::Agent {
                    company_id,
                    agent_id,
                    rest,
                };
            }
        }

        RoutePath::Unguarded
    }

    /// True for paths under `/admin/`. The bare `/admin` is guarded but not scoped.
    pub fn is_admin_scoped(&self) -> bool {
        matches!(self, RoutePath::Admin { scoped: true })
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, RoutePath::Entry { .. })
    }

    /// Whether the path falls inside the fixed set of patterns the gate runs on.
    pub fn is_guarded(&self) -> bool {
        !matches!(self, RoutePath::Unguarded)
    }
}

/// Splits `company/rest` into a non-empty leading segment and the remainder
/// after its slash. Requires the slash to be present.
fn split_segment(input: &str) -> Option<(&str, &str)> {
    let (segment, rest) = input.split_once('/')?;
    (!segment.is_empty()).then_some((segment, rest))
}

/// Splits `identity[/...]` into a non-empty identity and the remainder with
/// its leading slash kept.
fn identity_and_rest(input: &str) -> Option<(&str, &str)> {
    let end = input.find('/').unwrap_or(input.len());
    let (identity, rest) = input.split_at(end);
    (!identity.is_empty()).then_some((identity, rest))
}

/// Final path segment, used for static-file detection.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
