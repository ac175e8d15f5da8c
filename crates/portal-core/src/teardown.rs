//! Per-render teardown registry.
//!
//! Every resource a view wires up (event bindings, timers) is tied to
//! the render that created it and released en masse before the next
//! render begins. Disposers are zero-argument closures invoked at most
//! once, in unspecified order; a panicking disposer cannot prevent the
//! others from running.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use crate::timers::TimerRegistry;

type Disposer = Box<dyn FnOnce()>;

/// The cleanup set for the current render.
pub struct TeardownRegistry {
    disposers: RefCell<Vec<Disposer>>,
    timers: Rc<TimerRegistry>,
}

impl TeardownRegistry {
    /// Create a registry coupled to the timer registry it must stop on
    /// every flush (interval timers are not expressed as disposers).
    pub fn new(timers: Rc<TimerRegistry>) -> Self {
        Self {
            disposers: RefCell::new(Vec::new()),
            timers,
        }
    }

    /// Add a disposer to the current render's cleanup set.
    pub fn register(&self, disposer: impl FnOnce() + 'static) {
        self.disposers.borrow_mut().push(Box::new(disposer));
    }

    /// Run every registered disposer once and clear the set, then stop
    /// all interval timers. Panics are isolated per disposer and logged.
    ///
    /// The router calls this at the start of every render cycle,
    /// including the very first, before the previous view's content is
    /// cleared.
    pub fn flush(&self) {
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        let count = disposers.len();
        for disposer in disposers {
            if catch_unwind(AssertUnwindSafe(disposer)).is_err() {
                log::warn!("teardown disposer panicked; continuing flush");
            }
        }
        if count > 0 {
            log::debug!("flushed {count} teardown disposers");
        }
        self.timers.stop_all();
    }

    /// Number of registered disposers.
    pub fn len(&self) -> usize {
        self.disposers.borrow().len()
    }

    /// Returns `true` when no disposers are registered.
    pub fn is_empty(&self) -> bool {
        self.disposers.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    fn registry() -> TeardownRegistry {
        TeardownRegistry::new(Rc::new(TimerRegistry::new()))
    }

    #[test]
    fn flush_runs_each_disposer_once() {
        let reg = registry();
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let count = Rc::clone(&count);
            reg.register(move || count.set(count.get() + 1));
        }
        assert_eq!(reg.len(), 3);

        reg.flush();
        assert_eq!(count.get(), 3);
        assert!(reg.is_empty());

        // A second flush finds nothing to run.
        reg.flush();
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn panicking_disposer_does_not_stop_others() {
        let reg = registry();
        let ran = Rc::new(Cell::new(false));
        reg.register(|| panic!("listener already removed"));
        {
            let ran = Rc::clone(&ran);
            reg.register(move || ran.set(true));
        }

        reg.flush();
        assert!(ran.get());
        assert!(reg.is_empty());
    }

    #[test]
    fn flush_stops_interval_timers() {
        let timers = Rc::new(TimerRegistry::new());
        let reg = TeardownRegistry::new(Rc::clone(&timers));
        timers.start(Duration::from_secs(1), |_| {});
        assert_eq!(timers.active(), 1);

        reg.flush();
        assert_eq!(timers.active(), 0);
    }

    #[test]
    fn registration_during_flush_lands_in_next_generation() {
        // A disposer that registers another disposer: the new one must
        // survive the current flush and run in the next.
        let reg = Rc::new(registry());
        let late = Rc::new(Cell::new(false));
        {
            let reg2 = Rc::clone(&reg);
            let late = Rc::clone(&late);
            reg.register(move || {
                let late = Rc::clone(&late);
                reg2.register(move || late.set(true));
            });
        }

        reg.flush();
        assert!(!late.get());
        assert_eq!(reg.len(), 1);

        reg.flush();
        assert!(late.get());
    }
}
