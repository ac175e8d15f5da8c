//! The router: navigation interception, route guards, and the render
//! lifecycle.
//!
//! One render cycle is one generation: *Idle* -> *Rendering(token)* ->
//! *Idle*. Entering a cycle flushes the previous view's teardown set,
//! clears the host region, canonicalizes the visible path (history
//! replace, never push), resolves the route, and evaluates the session
//! guard -- all synchronously, before any data loads. Only then does
//! the view's (possibly async) content function run. The mount token
//! captured at the start must still be current when the content
//! resolves, otherwise the result is discarded: the last navigation to
//! start always wins the host write, and slow fetches are ignored
//! rather than aborted.

use std::rc::Rc;

use crate::data::DataSource;
use crate::guard::{self, Access};
use crate::host::{Clock, Location, ViewHost};
use crate::lifecycle::{Lifecycle, MountCounter};
use crate::routes;
use crate::session::SessionStore;
use crate::teardown::TeardownRegistry;
use crate::timers::TimerRegistry;
use crate::url;
use crate::view::{ViewContext, ViewRegistry};
use crate::widgets::{EventKind, FormData, UiAction, WidgetBindings};

/// What became of a link click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Internal target: the router rendered it.
    Intercepted,
    /// External target: default navigation proceeds untouched.
    Passed,
}

/// The portal's navigation and render controller.
///
/// Exclusive owner of the view-host region: content is written only
/// through the render pipeline here.
pub struct Router {
    views: ViewRegistry,
    session: Rc<SessionStore>,
    data: Rc<dyn DataSource>,
    host: Rc<dyn ViewHost>,
    clock: Rc<dyn Clock>,
    mount: Rc<MountCounter>,
    timers: Rc<TimerRegistry>,
    teardown: Rc<TeardownRegistry>,
    bindings: Rc<WidgetBindings>,
}

impl Router {
    pub fn new(
        views: ViewRegistry,
        session: Rc<SessionStore>,
        data: Rc<dyn DataSource>,
        host: Rc<dyn ViewHost>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let timers = Rc::new(TimerRegistry::new());
        let teardown = Rc::new(TeardownRegistry::new(Rc::clone(&timers)));
        Self {
            views,
            session,
            data,
            host,
            clock,
            mount: Rc::new(MountCounter::new()),
            timers,
            teardown,
            bindings: Rc::new(WidgetBindings::new()),
        }
    }

    /// Render whatever the host's current location says. The first
    /// render of a session goes through here too.
    pub async fn boot(&self) {
        self.render().await;
    }

    /// Programmatic navigation: push a history entry and render.
    pub async fn push(&self, target: &str) {
        self.host.push_url(target);
        self.render().await;
    }

    /// Navigation without a history entry.
    pub async fn replace(&self, target: &str) {
        self.host.replace_url(target);
        self.render().await;
    }

    /// A link was clicked. External targets are never intercepted;
    /// internal ones always trigger a full render cycle, even when
    /// only the query string changed -- `section` and `id` are route
    /// state, not cosmetics.
    pub async fn on_link_click(&self, href: &str) -> Interception {
        let origin = self.host.origin();
        if url::is_external(href, &origin) {
            log::debug!("passing external link {href}");
            return Interception::Passed;
        }
        self.push(url::strip_origin(href, &origin)).await;
        Interception::Intercepted
    }

    /// History back/forward: the host already moved its location.
    pub async fn on_pop_state(&self) {
        self.render().await;
    }

    /// The page was restored from the navigation cache. No navigation
    /// technically occurred, but the restored document carries the old
    /// render's timers and listeners, so this is treated exactly like
    /// a back/forward event: a fresh cycle whose flush stops them all.
    pub async fn on_page_restore(&self) {
        log::debug!("page restored from cache; re-rendering");
        self.render().await;
    }

    /// Drive interval timers (dashboard clocks). The shell pumps this
    /// from its main loop.
    pub fn tick(&self) {
        self.timers.tick(self.clock.now());
    }

    /// Feed a widget event back into the current render's bindings.
    /// Returns `false` when nothing is bound (the event predates the
    /// current render, or the widget never existed).
    pub async fn dispatch(&self, widget: &str, kind: EventKind, form: FormData) -> bool {
        let Some(handler) = self.bindings.handler(widget, kind) else {
            log::debug!("no {kind:?} binding for {widget}");
            return false;
        };
        let actions = handler(form).await;
        for action in actions {
            match action {
                UiAction::SetText { id, text } => self.host.set_text(&id, &text),
                UiAction::Navigate(target) => self.push(&target).await,
            }
        }
        true
    }

    /// One render cycle; loops only when a guard redirects, which
    /// supersedes the cycle with a fresh token for the new target.
    async fn render(&self) {
        loop {
            let token = self.mount.next();
            log::debug!("render {token}: begin");

            // Release the previous render's resources before touching
            // the host, then take exclusive ownership of the region.
            self.teardown.flush();
            self.host.clear_content();

            let location = self.host.location();
            let path = url::normalize(&location.path);
            if path != location.path {
                let fixed = Location::new(path.clone(), location.query.as_deref());
                log::debug!("render {token}: canonicalized {} -> {path}", location.path);
                self.host.replace_url(&fixed.target());
            }

            let route = routes::resolve_with_item_suffix(&path);
            let session = self.session.get();
            match guard::authorize(route, session.as_ref()) {
                Access::Redirect(target) => {
                    log::info!("render {token}: guard redirect {path} -> {target}");
                    self.host.push_url(target);
                    continue;
                },
                Access::Allow => {},
            }

            let Some(view) = self.views.get(route) else {
                log::error!("render {token}: no view registered for {route:?}");
                self.host.set_content(&error_fragment("this page is unavailable"));
                return;
            };

            let ctx = ViewContext {
                route,
                path,
                query: location.query,
                session,
                data: Rc::clone(&self.data),
                session_store: Rc::clone(&self.session),
                host: Rc::clone(&self.host),
                lifecycle: Lifecycle::new(
                    token,
                    Rc::clone(&self.mount),
                    Rc::clone(&self.teardown),
                    Rc::clone(&self.timers),
                    Rc::clone(&self.bindings),
                ),
            };

            let result = view(ctx).await;

            if !self.mount.is_current(token) {
                log::debug!("render {token}: superseded, discarding result");
                return;
            }
            match result {
                Ok(markup) => {
                    self.host.set_content(&markup);
                    self.host.scroll_to_top();
                    log::debug!("render {token}: committed {route:?}");
                },
                Err(e) => {
                    log::warn!("render {token}: view for {route:?} failed: {e}");
                    self.host.set_content(&error_fragment(&e.to_string()));
                },
            }
            return;
        }
    }

    /// The session store (for the shell's logout path).
    pub fn session(&self) -> Rc<SessionStore> {
        Rc::clone(&self.session)
    }

    /// The teardown registry (inspection).
    pub fn teardown(&self) -> &TeardownRegistry {
        &self.teardown
    }

    /// The timer registry (inspection).
    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    /// The widget binding table (inspection).
    pub fn bindings(&self) -> &WidgetBindings {
        &self.bindings
    }
}

/// The generic failure fragment, rendered inside the page chrome in
/// place of the view. Data-layer messages are presentable by contract.
fn error_fragment(message: &str) -> String {
    format!(
        "<section class=\"card error-card\"><h3>Something went wrong</h3>\
         <p>{message}</p></section>"
    )
}
