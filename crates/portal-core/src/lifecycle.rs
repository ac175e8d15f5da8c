//! Render generations and the per-render lifecycle capability.
//!
//! Every render cycle gets a fresh mount token from the process-wide
//! counter. The [`Lifecycle`] handle threads that token through every
//! view-setup call: registrations made after the render has been
//! superseded are dropped, which is what keeps a slow view's late
//! continuations from planting listeners or timers into someone else's
//! render.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::teardown::TeardownRegistry;
use crate::timers::TimerRegistry;
use crate::widgets::{EventHandler, EventKind, WidgetBindings};

/// Monotonic render-generation counter.
#[derive(Default)]
pub struct MountCounter {
    current: Cell<u64>,
}

impl MountCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new generation and return its token.
    pub fn next(&self) -> u64 {
        let token = self.current.get() + 1;
        self.current.set(token);
        token
    }

    /// The token of the latest generation.
    pub fn current(&self) -> u64 {
        self.current.get()
    }

    /// Whether `token` is still the latest generation.
    pub fn is_current(&self, token: u64) -> bool {
        self.current.get() == token
    }

    /// Reset to generation zero (test hook).
    pub fn reset(&self) {
        self.current.set(0);
    }
}

/// The capability a view uses to tie resources to its render.
///
/// Cheap to clone; async view code keeps a clone across awaits and may
/// keep registering for as long as [`Lifecycle::is_current`] holds.
#[derive(Clone)]
pub struct Lifecycle {
    token: u64,
    mount: Rc<MountCounter>,
    teardown: Rc<TeardownRegistry>,
    timers: Rc<TimerRegistry>,
    bindings: Rc<WidgetBindings>,
}

impl Lifecycle {
    pub fn new(
        token: u64,
        mount: Rc<MountCounter>,
        teardown: Rc<TeardownRegistry>,
        timers: Rc<TimerRegistry>,
        bindings: Rc<WidgetBindings>,
    ) -> Self {
        Self {
            token,
            mount,
            teardown,
            timers,
            bindings,
        }
    }

    /// The mount token of the render this handle belongs to.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Whether the owning render is still the latest one.
    pub fn is_current(&self) -> bool {
        self.mount.is_current(self.token)
    }

    /// Register a cleanup disposer for this render.
    pub fn on_teardown(&self, disposer: impl FnOnce() + 'static) {
        if !self.is_current() {
            log::debug!("dropping teardown registration from superseded render {}", self.token);
            return;
        }
        self.teardown.register(disposer);
    }

    /// Start an interval timer owned by this render. Stopped by the
    /// next flush (or page restore) along with every other timer.
    pub fn every(&self, period: Duration, tick: impl FnMut(NaiveDateTime) + 'static) {
        if !self.is_current() {
            log::debug!("dropping timer from superseded render {}", self.token);
            return;
        }
        self.timers.start(period, tick);
    }

    /// Bind a submit handler; unbinding is registered as teardown.
    pub fn on_submit(&self, widget: &str, handler: EventHandler) {
        self.on_event(widget, EventKind::Submit, handler);
    }

    /// Bind a click handler; unbinding is registered as teardown.
    pub fn on_click(&self, widget: &str, handler: EventHandler) {
        self.on_event(widget, EventKind::Click, handler);
    }

    fn on_event(&self, widget: &str, kind: EventKind, handler: EventHandler) {
        if !self.is_current() {
            log::debug!("dropping {kind:?} binding from superseded render {}", self.token);
            return;
        }
        self.bindings.bind(widget, kind, handler);
        let bindings = Rc::clone(&self.bindings);
        let widget = widget.to_string();
        self.teardown
            .register(move || bindings.unbind(&widget, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::cell::Cell as StdCell;

    fn fixture() -> (Rc<MountCounter>, Rc<TeardownRegistry>, Rc<TimerRegistry>, Rc<WidgetBindings>)
    {
        let timers = Rc::new(TimerRegistry::new());
        (
            Rc::new(MountCounter::new()),
            Rc::new(TeardownRegistry::new(Rc::clone(&timers))),
            timers,
            Rc::new(WidgetBindings::new()),
        )
    }

    fn lifecycle_for(
        token: u64,
        parts: &(Rc<MountCounter>, Rc<TeardownRegistry>, Rc<TimerRegistry>, Rc<WidgetBindings>),
    ) -> Lifecycle {
        Lifecycle::new(
            token,
            Rc::clone(&parts.0),
            Rc::clone(&parts.1),
            Rc::clone(&parts.2),
            Rc::clone(&parts.3),
        )
    }

    #[test]
    fn mount_counter_is_monotonic() {
        let mount = MountCounter::new();
        let a = mount.next();
        let b = mount.next();
        assert!(b > a);
        assert!(mount.is_current(b));
        assert!(!mount.is_current(a));
    }

    #[test]
    fn current_lifecycle_registers() {
        let parts = fixture();
        let token = parts.0.next();
        let lc = lifecycle_for(token, &parts);

        lc.on_teardown(|| {});
        lc.every(Duration::from_secs(1), |_| {});
        lc.on_click("btn", Rc::new(|_| async { Vec::new() }.boxed_local()));

        assert_eq!(parts.1.len(), 2); // disposer + unbind
        assert_eq!(parts.2.active(), 1);
        assert_eq!(parts.3.len(), 1);
    }

    #[test]
    fn superseded_lifecycle_registrations_are_dropped() {
        let parts = fixture();
        let token = parts.0.next();
        let stale = lifecycle_for(token, &parts);
        parts.0.next(); // a newer render began

        assert!(!stale.is_current());
        stale.on_teardown(|| {});
        stale.every(Duration::from_secs(1), |_| {});
        stale.on_submit("form", Rc::new(|_| async { Vec::new() }.boxed_local()));

        assert!(parts.1.is_empty());
        assert_eq!(parts.2.active(), 0);
        assert!(parts.3.is_empty());
    }

    #[test]
    fn flush_unbinds_event_handlers() {
        let parts = fixture();
        let token = parts.0.next();
        let lc = lifecycle_for(token, &parts);
        lc.on_submit("login-form", Rc::new(|_| async { Vec::new() }.boxed_local()));
        assert_eq!(parts.3.len(), 1);

        parts.1.flush();
        assert!(parts.3.is_empty());
        assert!(parts.1.is_empty());
    }

    #[test]
    fn teardown_set_empty_after_each_flush_for_any_sequence() {
        let parts = fixture();
        let ran = Rc::new(StdCell::new(0));
        for round in 0..5 {
            let token = parts.0.next();
            parts.1.flush();
            assert!(parts.1.is_empty(), "round {round}: flush left disposers behind");

            let lc = lifecycle_for(token, &parts);
            for _ in 0..round {
                let ran = Rc::clone(&ran);
                lc.on_teardown(move || ran.set(ran.get() + 1));
            }
        }
    }
}
