//! View functions and the route -> view registry.

use std::collections::HashMap;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use portal_types::{Result, Session};

use crate::data::DataSource;
use crate::host::ViewHost;
use crate::lifecycle::Lifecycle;
use crate::routes::RouteId;
use crate::session::SessionStore;
use crate::url;

/// Everything a view needs for one render.
///
/// Cheap to clone into async handlers. Query parameters are re-derived
/// per render by the router; views never cache them across renders.
#[derive(Clone)]
pub struct ViewContext {
    pub route: RouteId,
    pub path: String,
    pub query: Option<String>,
    pub session: Option<Session>,
    pub data: Rc<dyn DataSource>,
    pub session_store: Rc<SessionStore>,
    pub host: Rc<dyn ViewHost>,
    pub lifecycle: Lifecycle,
}

impl ViewContext {
    /// The dashboard sub-view selector (`?section=`), defaulting to
    /// `"home"`.
    pub fn section(&self) -> String {
        url::query_param(self.query.as_deref(), "section").unwrap_or_else(|| "home".to_string())
    }

    /// The news-item id: `?id=`, or a numeric trailing path segment.
    pub fn item_id(&self) -> Option<String> {
        url::item_id(&self.path, self.query.as_deref())
    }
}

/// A view produces the markup for the view host. Possibly
/// asynchronous; the final text is written only if the render is still
/// current when it resolves.
pub type ViewFuture = LocalBoxFuture<'static, Result<String>>;
pub type ViewFn = Rc<dyn Fn(ViewContext) -> ViewFuture>;

/// Route -> view mapping.
#[derive(Default)]
pub struct ViewRegistry {
    views: HashMap<RouteId, ViewFn>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the view for a route, replacing any previous one.
    pub fn register(&mut self, route: RouteId, view: ViewFn) {
        self.views.insert(route, view);
    }

    /// Look up a route's view.
    pub fn get(&self, route: RouteId) -> Option<ViewFn> {
        self.views.get(&route).map(Rc::clone)
    }
}
