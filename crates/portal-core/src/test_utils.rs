//! Shared fixtures for portal-core tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDateTime;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use portal_types::{PortalError, Result};
use serde_json::Value;

use crate::data::{DataSource, Freshness};
use crate::host::{Clock, Location, ViewHost};
use crate::lifecycle::{Lifecycle, MountCounter};
use crate::routes::RouteId;
use crate::session::{MemoryStorage, SessionStore};
use crate::teardown::TeardownRegistry;
use crate::timers::TimerRegistry;
use crate::view::ViewContext;
use crate::widgets::WidgetBindings;

/// A `ViewHost` that records everything done to it.
pub(crate) struct RecordingHost {
    pub location: RefCell<Location>,
    pub origin: String,
    pub content: RefCell<String>,
    pub texts: RefCell<HashMap<String, String>>,
    pub pushes: RefCell<Vec<String>>,
    pub replaces: RefCell<Vec<String>>,
    pub clears: Cell<usize>,
    pub scrolls: Cell<usize>,
}

impl RecordingHost {
    pub fn at(target: &str) -> Rc<Self> {
        Rc::new(Self {
            location: RefCell::new(Location::from_target(target)),
            origin: "https://portal.example".to_string(),
            content: RefCell::new(String::new()),
            texts: RefCell::new(HashMap::new()),
            pushes: RefCell::new(Vec::new()),
            replaces: RefCell::new(Vec::new()),
            clears: Cell::new(0),
            scrolls: Cell::new(0),
        })
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }
}

impl ViewHost for RecordingHost {
    fn location(&self) -> Location {
        self.location.borrow().clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn push_url(&self, target: &str) {
        *self.location.borrow_mut() = Location::from_target(target);
        self.pushes.borrow_mut().push(target.to_string());
    }

    fn replace_url(&self, target: &str) {
        *self.location.borrow_mut() = Location::from_target(target);
        self.replaces.borrow_mut().push(target.to_string());
    }

    fn clear_content(&self) {
        self.content.borrow_mut().clear();
        self.texts.borrow_mut().clear();
        self.clears.set(self.clears.get() + 1);
    }

    fn set_content(&self, markup: &str) {
        *self.content.borrow_mut() = markup.to_string();
    }

    fn set_text(&self, element_id: &str, text: &str) {
        self.texts
            .borrow_mut()
            .insert(element_id.to_string(), text.to_string());
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

/// An in-memory `DataSource` with per-call counting. Names absent
/// from the map fail to load.
pub(crate) struct MapSource {
    pub values: RefCell<HashMap<String, Value>>,
    pub gets: Cell<usize>,
}

impl MapSource {
    pub fn empty() -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new(HashMap::new()),
            gets: Cell::new(0),
        })
    }

    pub fn with(values: &[(&str, Value)]) -> Rc<Self> {
        let source = Self::empty();
        for (name, value) in values {
            source
                .values
                .borrow_mut()
                .insert((*name).to_string(), value.clone());
        }
        source
    }
}

impl DataSource for MapSource {
    fn get(&self, name: &str, _freshness: Freshness) -> LocalBoxFuture<'_, Result<Value>> {
        self.gets.set(self.gets.get() + 1);
        let result = self
            .values
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| PortalError::Data(format!("failed to load {name}")));
        async move { result }.boxed_local()
    }
}

/// A clock that only moves when told to.
pub(crate) struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn at_epoch() -> Rc<Self> {
        let start = chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Rc::new(Self { now: Cell::new(start) })
    }

    pub fn advance_secs(&self, secs: i64) {
        let next = self.now.get() + chrono::Duration::seconds(secs);
        self.now.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// A fully-plumbed `ViewContext` for view-level tests.
pub(crate) fn fixture_context(route: RouteId, path: &str, query: Option<&str>) -> ViewContext {
    let mount = Rc::new(MountCounter::new());
    let token = mount.next();
    let timers = Rc::new(TimerRegistry::new());
    let teardown = Rc::new(TeardownRegistry::new(Rc::clone(&timers)));
    let bindings = Rc::new(WidgetBindings::new());
    ViewContext {
        route,
        path: path.to_string(),
        query: query.map(str::to_string),
        session: None,
        data: MapSource::empty(),
        session_store: Rc::new(SessionStore::new(Box::new(MemoryStorage::new()))),
        host: RecordingHost::at(path),
        lifecycle: Lifecycle::new(token, mount, teardown, timers, bindings),
    }
}
