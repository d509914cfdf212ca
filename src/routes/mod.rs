/// Router Module Index
///
/// Splits the page tree the way the access gate sees it. The gate itself is
/// mounted once over the whole router and decides per path, so these modules
/// only group routes; they carry no middleware of their own.

/// Pages outside the guarded pattern set (landing, sign-in, not-found, ...).
pub mod public;

/// Tenant-scoped pages: the anonymous entry pages and the client/agent subtrees.
pub mod tenant;

/// Pages under `/admin/`, reserved to the `Admin` role.
pub mod admin;
