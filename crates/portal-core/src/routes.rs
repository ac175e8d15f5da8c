//! The static route table: canonical path -> route identifier.

use portal_types::Role;

/// Internal symbolic names for the portal's views, decoupled from URL
/// spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Home,
    News,
    Live,
    NewsItem,
    Login,
    DashAdmin,
    DashStudent,
}

/// One canonical spelling per logical route. `normalize` folds every
/// accepted alias into these, so resolution is a plain exact match.
const ROUTES: &[(&str, RouteId)] = &[
    ("/", RouteId::Home),
    ("/news", RouteId::News),
    ("/news/live", RouteId::Live),
    ("/news/item", RouteId::NewsItem),
    ("/login/", RouteId::Login),
    ("/dash/admin/", RouteId::DashAdmin),
    ("/dash/student", RouteId::DashStudent),
];

impl RouteId {
    /// The canonical path for this route.
    pub fn canonical_path(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, id)| *id == self)
            .map(|(path, _)| *path)
            .unwrap_or("/")
    }

    /// The role a session must hold to see this route, if any.
    pub fn required_role(self) -> Option<Role> {
        match self {
            RouteId::DashAdmin => Some(Role::Admin),
            RouteId::DashStudent => Some(Role::Student),
            _ => None,
        }
    }
}

/// The dashboard route for a given role.
pub fn dashboard_route(role: Role) -> RouteId {
    match role {
        Role::Admin => RouteId::DashAdmin,
        Role::Student => RouteId::DashStudent,
    }
}

/// Resolve a canonical path to a route identifier.
///
/// Total: unknown paths resolve to [`RouteId::Home`], never an error --
/// the portal has no 404 view.
pub fn resolve(canonical_path: &str) -> RouteId {
    ROUTES
        .iter()
        .find(|(path, _)| *path == canonical_path)
        .map(|(_, id)| *id)
        .unwrap_or(RouteId::Home)
}

/// Handle a path with a numeric news-item suffix (`/news/item/42`):
/// resolution treats it as the news-detail route. Everything else goes
/// through the exact table.
pub fn resolve_with_item_suffix(canonical_path: &str) -> RouteId {
    if let Some(rest) = canonical_path.strip_prefix("/news/item/") {
        let rest = rest.trim_end_matches('/');
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return RouteId::NewsItem;
        }
    }
    resolve(canonical_path)
}
