//! Shared fixtures for view tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use portal_core::{
    Clock, DataSource, Freshness, Lifecycle, Location, MemoryStorage, MountCounter, RouteId,
    SessionStore, TeardownRegistry, TimerRegistry, ViewContext, ViewFuture, ViewHost,
    WidgetBindings,
};
use portal_types::{PortalError, Result, Session};
use serde_json::Value;

/// In-memory data source; names absent from the map fail to load.
pub(crate) struct FakeData {
    values: HashMap<String, Value>,
    pub gets: Cell<usize>,
    pub fresh_gets: Cell<usize>,
}

impl FakeData {
    pub fn new(values: &[(&str, Value)]) -> Rc<Self> {
        Rc::new(Self {
            values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            gets: Cell::new(0),
            fresh_gets: Cell::new(0),
        })
    }
}

impl DataSource for FakeData {
    fn get(&self, name: &str, freshness: Freshness) -> LocalBoxFuture<'_, Result<Value>> {
        self.gets.set(self.gets.get() + 1);
        if freshness == Freshness::Fresh {
            self.fresh_gets.set(self.fresh_gets.get() + 1);
        }
        let result = self
            .values
            .get(name)
            .cloned()
            .ok_or_else(|| PortalError::Data(format!("failed to load {name}")));
        async move { result }.boxed_local()
    }
}

/// Minimal recording host for view tests.
pub(crate) struct FakeHost {
    pub location: RefCell<Location>,
    pub content: RefCell<String>,
    pub texts: RefCell<HashMap<String, String>>,
    pub pushes: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn at(target: &str) -> Rc<Self> {
        Rc::new(Self {
            location: RefCell::new(Location::from_target(target)),
            content: RefCell::new(String::new()),
            texts: RefCell::new(HashMap::new()),
            pushes: RefCell::new(Vec::new()),
        })
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }
}

impl ViewHost for FakeHost {
    fn location(&self) -> Location {
        self.location.borrow().clone()
    }

    fn origin(&self) -> String {
        "https://portal.example".to_string()
    }

    fn push_url(&self, target: &str) {
        *self.location.borrow_mut() = Location::from_target(target);
        self.pushes.borrow_mut().push(target.to_string());
    }

    fn replace_url(&self, target: &str) {
        *self.location.borrow_mut() = Location::from_target(target);
    }

    fn clear_content(&self) {
        self.content.borrow_mut().clear();
        self.texts.borrow_mut().clear();
    }

    fn set_content(&self, markup: &str) {
        *self.content.borrow_mut() = markup.to_string();
    }

    fn set_text(&self, element_id: &str, text: &str) {
        self.texts
            .borrow_mut()
            .insert(element_id.to_string(), text.to_string());
    }

    fn scroll_to_top(&self) {}
}

pub(crate) struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> chrono::NaiveDateTime {
        chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }
}

/// The parts a test may want to poke after building a context.
pub(crate) struct ContextParts {
    pub ctx: ViewContext,
    pub data: Rc<FakeData>,
    pub host: Rc<FakeHost>,
    pub session_store: Rc<SessionStore>,
    pub timers: Rc<TimerRegistry>,
    pub bindings: Rc<WidgetBindings>,
}

pub(crate) fn context_parts(
    route: RouteId,
    path: &str,
    query: Option<&str>,
    session: Option<Session>,
    values: &[(&str, Value)],
) -> ContextParts {
    let data = FakeData::new(values);
    let host = FakeHost::at(path);
    let session_store = Rc::new(SessionStore::new(Box::new(MemoryStorage::new())));
    if let Some(session) = &session {
        session_store.set(session);
    }
    let mount = Rc::new(MountCounter::new());
    let token = mount.next();
    let timers = Rc::new(TimerRegistry::new());
    let teardown = Rc::new(TeardownRegistry::new(Rc::clone(&timers)));
    let bindings = Rc::new(WidgetBindings::new());
    let ctx = ViewContext {
        route,
        path: path.to_string(),
        query: query.map(str::to_string),
        session,
        data: Rc::clone(&data) as Rc<dyn DataSource>,
        session_store: Rc::clone(&session_store),
        host: Rc::clone(&host) as Rc<dyn ViewHost>,
        lifecycle: Lifecycle::new(token, mount, teardown, Rc::clone(&timers), Rc::clone(&bindings)),
    };
    ContextParts {
        ctx,
        data,
        host,
        session_store,
        timers,
        bindings,
    }
}

/// A context with data only (no session, no inspection handles kept).
pub(crate) fn context_with_data(
    route: RouteId,
    path: &str,
    query: Option<&str>,
    values: &[(&str, Value)],
) -> ViewContext {
    context_parts(route, path, query, None, values).ctx
}

/// Run a view function to completion on the current thread.
pub(crate) fn run_view(
    view: impl Fn(ViewContext) -> ViewFuture,
    ctx: ViewContext,
) -> Result<String> {
    futures::executor::block_on(view(ctx))
}
