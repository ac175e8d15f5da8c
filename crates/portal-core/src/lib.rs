//! Host-agnostic core of the school portal.
//!
//! The router and its lifecycle machinery: path canonicalization,
//! route resolution, role guards, the per-render teardown arena, the
//! interval-timer registry, widget bindings, the session store, and
//! the data-access seam. A shell provides the [`host::ViewHost`] and
//! [`host::Clock`] implementations and pumps events in; everything
//! else lives here, with no platform dependencies.

pub mod config;
pub mod data;
pub mod guard;
pub mod host;
pub mod lifecycle;
pub mod login;
pub mod router;
pub mod routes;
pub mod session;
pub mod teardown;
pub mod text;
pub mod timers;
pub mod url;
pub mod view;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use config::PortalConfig;
pub use data::{CachedSource, DataSource, Freshness, JsonFetcher};
pub use guard::{Access, authorize};
pub use host::{Clock, Location, SystemClock, ViewHost};
pub use lifecycle::{Lifecycle, MountCounter};
pub use login::{LoginOutcome, check_credentials};
pub use router::{Interception, Router};
pub use routes::{RouteId, dashboard_route, resolve};
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
pub use teardown::TeardownRegistry;
pub use timers::TimerRegistry;
pub use view::{ViewContext, ViewFn, ViewFuture, ViewRegistry};
pub use widgets::{EventKind, FormData, UiAction, WidgetBindings};
