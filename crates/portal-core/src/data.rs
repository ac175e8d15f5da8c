//! The data-access seam: named JSON resources with a freshness switch.
//!
//! Views depend only on [`DataSource`]. The provided [`CachedSource`]
//! wraps any [`JsonFetcher`] with a per-resource cache; `Fresh` reads
//! bypass and repopulate it. Fetches are never aborted by navigation --
//! a superseded render's result is simply ignored by the router.

use std::cell::RefCell;
use std::collections::HashMap;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use portal_types::{PortalError, Result};
use serde_json::Value;

/// Cache behavior for one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Serve from cache when present.
    Cached,
    /// Bypass any cache layer and repopulate it.
    Fresh,
}

/// Named JSON resources (`"news"`, `"students"`, ...).
///
/// Failure messages are shown to users verbatim, so implementations
/// must keep them presentable.
pub trait DataSource {
    fn get(&self, name: &str, freshness: Freshness) -> LocalBoxFuture<'_, Result<Value>>;
}

/// Raw resource bytes by name; the shell decides where they live.
pub trait JsonFetcher {
    fn fetch(&self, name: &str) -> Result<String>;
}

/// A [`DataSource`] caching parsed values per resource name.
pub struct CachedSource {
    fetcher: Box<dyn JsonFetcher>,
    cache: RefCell<HashMap<String, Value>>,
}

impl CachedSource {
    pub fn new(fetcher: Box<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Drop every cached value.
    pub fn invalidate(&self) {
        self.cache.borrow_mut().clear();
    }

    fn load(&self, name: &str, freshness: Freshness) -> Result<Value> {
        if freshness == Freshness::Cached {
            if let Some(value) = self.cache.borrow().get(name) {
                return Ok(value.clone());
            }
        }
        let raw = self
            .fetcher
            .fetch(name)
            .map_err(|e| PortalError::Data(format!("failed to load {name}: {e}")))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| PortalError::Data(format!("failed to parse {name}: {e}")))?;
        self.cache
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }
}

impl DataSource for CachedSource {
    fn get(&self, name: &str, freshness: Freshness) -> LocalBoxFuture<'_, Result<Value>> {
        let result = self.load(name, freshness);
        async move { result }.boxed_local()
    }
}
