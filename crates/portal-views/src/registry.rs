//! Wires every route to its view.

use std::rc::Rc;

use portal_core::{RouteId, ViewRegistry};

use crate::{dash_admin, dash_student, home, live, login, news};

/// The full route -> view table for the portal.
pub fn build_registry() -> ViewRegistry {
    let mut views = ViewRegistry::new();
    views.register(RouteId::Home, Rc::new(home::view));
    views.register(RouteId::News, Rc::new(news::list));
    views.register(RouteId::NewsItem, Rc::new(news::item));
    views.register(RouteId::Live, Rc::new(live::view));
    views.register(RouteId::Login, Rc::new(login::view));
    views.register(RouteId::DashAdmin, Rc::new(dash_admin::view));
    views.register(RouteId::DashStudent, Rc::new(dash_student::view));
    views
}
