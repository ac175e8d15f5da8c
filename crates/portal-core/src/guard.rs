//! Role-based route guards.
//!
//! Evaluated synchronously by the router before any data loading for
//! the target view begins, so a denied navigation costs no fetch.

use portal_types::Session;

use crate::routes::{RouteId, dashboard_route};

/// Outcome of guarding a route against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render the route.
    Allow,
    /// Do not render; start a new render cycle for this path instead.
    Redirect(&'static str),
}

/// Authorize `route` for `session`.
///
/// Role-restricted routes require the exact role; a missing session or
/// a role mismatch redirects to the login form. The login route itself
/// redirects an already-authenticated session to its own dashboard.
pub fn authorize(route: RouteId, session: Option<&Session>) -> Access {
    if let Some(required) = route.required_role() {
        return match session {
            Some(s) if s.role == required => Access::Allow,
            _ => Access::Redirect(RouteId::Login.canonical_path()),
        };
    }
    if route == RouteId::Login {
        if let Some(s) = session {
            return Access::Redirect(dashboard_route(s.role).canonical_path());
        }
    }
    Access::Allow
}
