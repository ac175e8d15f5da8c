//! The page-shell cache: the navigation-interception contract.
//!
//! The portal is a single-page app, so every top-level navigation
//! should receive the same cached app shell; the router takes it from
//! there on the client side. Only navigation requests are intercepted:
//! data requests pass through untouched so the data layer's freshness
//! switch keeps meaning something. On activation the cache takes
//! control of open tabs immediately, without waiting for a reload.

use std::cell::RefCell;

/// What kind of request is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// A top-level document navigation.
    Navigate,
    /// Anything else (JSON resources, media).
    Data,
}

/// Decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDecision {
    /// Serve this body instead of fetching.
    Serve(String),
    /// Not intercepted; the caller fetches as usual.
    PassThrough,
}

/// Navigation-level cache for the app shell document.
pub struct ShellCache {
    shell: RefCell<Option<String>>,
    active: RefCell<bool>,
}

impl Default for ShellCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellCache {
    pub fn new() -> Self {
        Self {
            shell: RefCell::new(None),
            active: RefCell::new(false),
        }
    }

    /// Install the shell document and take control immediately.
    pub fn activate(&self, shell: &str) {
        *self.shell.borrow_mut() = Some(shell.to_string());
        *self.active.borrow_mut() = true;
        log::info!("shell cache activated ({} bytes)", shell.len());
    }

    /// Whether the cache currently controls navigation requests.
    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    /// Decide one request. Navigation requests are answered from the
    /// cached shell; everything else passes through.
    pub fn handle(&self, mode: RequestMode) -> CacheDecision {
        if mode != RequestMode::Navigate || !self.is_active() {
            return CacheDecision::PassThrough;
        }
        match self.shell.borrow().as_ref() {
            Some(shell) => CacheDecision::Serve(shell.clone()),
            None => CacheDecision::PassThrough,
        }
    }
}
