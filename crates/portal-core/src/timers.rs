//! Interval timers for live widgets (dashboard clocks).
//!
//! Timers are not ordinary teardown disposers: they keep firing until
//! someone stops them, so leaking one across a navigation accumulates
//! background work forever. The registry therefore supports a blanket
//! `stop_all`, signalled by every teardown flush and by page-cache
//! restoration.
//!
//! The host pumps `tick(now)` from its main loop; a timer fires on the
//! first tick after registration and then once per elapsed period.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use chrono::NaiveDateTime;

type TickFn = Box<dyn FnMut(NaiveDateTime)>;

struct Timer {
    period: Duration,
    last_fired: Option<NaiveDateTime>,
    tick: TickFn,
}

/// Registry of running interval timers.
pub struct TimerRegistry {
    timers: RefCell<Vec<Timer>>,
    /// Bumped by `stop_all` so a tick in progress drops stale timers
    /// instead of resurrecting them.
    epoch: Cell<u64>,
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self {
            timers: RefCell::new(Vec::new()),
            epoch: Cell::new(0),
        }
    }

    /// Register an interval timer. It fires on the next tick and then
    /// once per elapsed `period` until `stop_all`.
    pub fn start(&self, period: Duration, tick: impl FnMut(NaiveDateTime) + 'static) {
        self.timers.borrow_mut().push(Timer {
            period,
            last_fired: None,
            tick: Box::new(tick),
        });
    }

    /// Stop every running timer.
    pub fn stop_all(&self) {
        let stopped = self.timers.borrow_mut().len();
        self.epoch.set(self.epoch.get() + 1);
        self.timers.borrow_mut().clear();
        if stopped > 0 {
            log::debug!("stopped {stopped} interval timers");
        }
    }

    /// Number of running timers.
    pub fn active(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Fire every due timer. Callbacks may start new timers; if one
    /// triggers `stop_all` (e.g. by navigating), the in-flight batch is
    /// discarded with the rest of its generation.
    pub fn tick(&self, now: NaiveDateTime) {
        let epoch = self.epoch.get();
        let mut batch: Vec<Timer> = self.timers.borrow_mut().drain(..).collect();

        for timer in &mut batch {
            let due = match timer.last_fired {
                None => true,
                Some(last) => {
                    let elapsed = now.signed_duration_since(last);
                    elapsed.num_milliseconds() >= timer.period.as_millis() as i64
                },
            };
            if due {
                (timer.tick)(now);
                timer.last_fired = Some(now);
            }
            if self.epoch.get() != epoch {
                return;
            }
        }

        // Merge back, keeping timers started by the callbacks.
        let mut slot = self.timers.borrow_mut();
        let started_during_tick = std::mem::take(&mut *slot);
        *slot = batch;
        slot.extend(started_during_tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn at(secs: i64) -> NaiveDateTime {
        chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
    }

    #[test]
    fn timer_fires_immediately_then_per_period() {
        let reg = TimerRegistry::new();
        let fired = Rc::new(Cell::new(0));
        {
            let fired = Rc::clone(&fired);
            reg.start(Duration::from_secs(1), move |_| fired.set(fired.get() + 1));
        }

        reg.tick(at(0));
        assert_eq!(fired.get(), 1);

        // Not due yet.
        reg.tick(at(0));
        assert_eq!(fired.get(), 1);

        reg.tick(at(1));
        assert_eq!(fired.get(), 2);
        reg.tick(at(5));
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn stop_all_silences_everything() {
        let reg = TimerRegistry::new();
        let fired = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let fired = Rc::clone(&fired);
            reg.start(Duration::from_secs(1), move |_| fired.set(fired.get() + 1));
        }
        assert_eq!(reg.active(), 3);

        reg.stop_all();
        assert_eq!(reg.active(), 0);
        reg.tick(at(10));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn callback_may_start_a_timer() {
        let reg = Rc::new(TimerRegistry::new());
        let inner_fired = Rc::new(Cell::new(false));
        {
            let reg2 = Rc::clone(&reg);
            let inner_fired = Rc::clone(&inner_fired);
            reg.start(Duration::from_secs(60), move |_| {
                let inner_fired = Rc::clone(&inner_fired);
                reg2.start(Duration::from_secs(1), move |_| inner_fired.set(true));
            });
        }

        reg.tick(at(0));
        assert_eq!(reg.active(), 2);
        reg.tick(at(1));
        assert!(inner_fired.get());
    }

    #[test]
    fn stop_all_from_callback_discards_the_batch() {
        let reg = Rc::new(TimerRegistry::new());
        let later_fired = Rc::new(Cell::new(false));
        {
            let reg2 = Rc::clone(&reg);
            reg.start(Duration::from_secs(1), move |_| reg2.stop_all());
        }
        {
            let later_fired = Rc::clone(&later_fired);
            reg.start(Duration::from_secs(1), move |_| later_fired.set(true));
        }

        reg.tick(at(0));
        // The first callback stopped everything; the second never ran
        // and nothing survives.
        assert!(!later_fired.get());
        assert_eq!(reg.active(), 0);
    }
}
