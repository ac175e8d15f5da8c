//! Per-render interactive widget bindings.
//!
//! Views register named event handlers (form submits, button clicks)
//! while they render; the host feeds user events back through
//! [`crate::router::Router::dispatch`]. Each binding's removal is a
//! teardown disposer, so the whole table empties with its render.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

/// Field values captured from a form or widget at event time.
pub type FormData = HashMap<String, String>;

/// What a handler wants done once it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Navigate to an internal target (pushes a history entry).
    Navigate(String),
    /// Replace the text of an element; a no-op if the element is gone.
    SetText { id: String, text: String },
}

/// Event kinds the portal's widgets bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Click,
}

/// Handlers may suspend (the login lookup does) and resolve to the
/// actions the router should apply.
pub type HandlerFuture = LocalBoxFuture<'static, Vec<UiAction>>;
pub type EventHandler = Rc<dyn Fn(FormData) -> HandlerFuture>;

/// The binding table for the current render.
#[derive(Default)]
pub struct WidgetBindings {
    handlers: RefCell<HashMap<(String, EventKind), EventHandler>>,
}

impl WidgetBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to `(widget, kind)`, replacing any previous one.
    pub fn bind(&self, widget: &str, kind: EventKind, handler: EventHandler) {
        self.handlers
            .borrow_mut()
            .insert((widget.to_string(), kind), handler);
    }

    /// Remove one binding (the teardown path).
    pub fn unbind(&self, widget: &str, kind: EventKind) {
        self.handlers
            .borrow_mut()
            .remove(&(widget.to_string(), kind));
    }

    /// Look up the handler for an event, if any.
    pub fn handler(&self, widget: &str, kind: EventKind) -> Option<EventHandler> {
        self.handlers
            .borrow()
            .get(&(widget.to_string(), kind))
            .map(Rc::clone)
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Returns `true` when no bindings are live.
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn noop_handler() -> EventHandler {
        Rc::new(|_form| async { Vec::new() }.boxed_local())
    }

    #[test]
    fn bind_and_look_up() {
        let bindings = WidgetBindings::new();
        bindings.bind("login-form", EventKind::Submit, noop_handler());

        assert!(bindings.handler("login-form", EventKind::Submit).is_some());
        assert!(bindings.handler("login-form", EventKind::Click).is_none());
        assert!(bindings.handler("other", EventKind::Submit).is_none());
    }

    #[test]
    fn unbind_removes_only_that_binding() {
        let bindings = WidgetBindings::new();
        bindings.bind("search", EventKind::Click, noop_handler());
        bindings.bind("login-form", EventKind::Submit, noop_handler());
        assert_eq!(bindings.len(), 2);

        bindings.unbind("search", EventKind::Click);
        assert!(bindings.handler("search", EventKind::Click).is_none());
        assert!(bindings.handler("login-form", EventKind::Submit).is_some());
    }

    #[test]
    fn rebinding_replaces_the_handler() {
        let bindings = WidgetBindings::new();
        bindings.bind(
            "btn",
            EventKind::Click,
            Rc::new(|_| {
                async { vec![UiAction::SetText { id: "out".into(), text: "first".into() }] }
                    .boxed_local()
            }),
        );
        bindings.bind(
            "btn",
            EventKind::Click,
            Rc::new(|_| {
                async { vec![UiAction::SetText { id: "out".into(), text: "second".into() }] }
                    .boxed_local()
            }),
        );
        assert_eq!(bindings.len(), 1);

        let handler = bindings.handler("btn", EventKind::Click).unwrap();
        let actions = futures::executor::block_on(handler(FormData::new()));
        assert_eq!(
            actions,
            vec![UiAction::SetText { id: "out".into(), text: "second".into() }]
        );
    }
}
