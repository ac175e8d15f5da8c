//! Host seams: the document region, address bar, and wall clock.
//!
//! The router never touches a concrete platform. A shell implements
//! these traits over whatever it has -- a real document, a terminal, a
//! recording buffer in tests -- and the router stays the exclusive
//! writer of the view-host region.

use chrono::NaiveDateTime;

/// The current address: canonical-ish path plus optional query string
/// (no leading `?`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>, query: Option<&str>) -> Self {
        Self {
            path: path.into(),
            query: query.map(str::to_string),
        }
    }

    /// Parse a navigation target (`/news/item?id=4`) into a location.
    pub fn from_target(target: &str) -> Self {
        let (path, query) = crate::url::split_target(target);
        Self::new(path, query)
    }

    /// Recompose into a navigation target.
    pub fn target(&self) -> String {
        match &self.query {
            Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
            _ => self.path.clone(),
        }
    }
}

/// The document surface the router renders into.
///
/// `push_url`/`replace_url` update the visible address (with and
/// without a new history entry); content methods own the single view
/// host region. `set_text` targets an element inside the current
/// content and must be a no-op when the element no longer exists.
pub trait ViewHost {
    fn location(&self) -> Location;
    fn origin(&self) -> String;

    fn push_url(&self, target: &str);
    fn replace_url(&self, target: &str);

    fn clear_content(&self);
    fn set_content(&self, markup: &str);
    fn set_text(&self, element_id: &str, text: &str);
    fn scroll_to_top(&self);
}

/// Wall clock, injected so clock widgets and tests agree on time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// System clock for shells.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_target_round_trip() {
        let loc = Location::from_target("/news/item?id=42");
        assert_eq!(loc.path, "/news/item");
        assert_eq!(loc.query.as_deref(), Some("id=42"));
        assert_eq!(loc.target(), "/news/item?id=42");
    }

    #[test]
    fn location_without_query() {
        let loc = Location::from_target("/news");
        assert_eq!(loc.query, None);
        assert_eq!(loc.target(), "/news");
    }

    #[test]
    fn empty_query_is_not_rendered() {
        let loc = Location::new("/news", Some(""));
        assert_eq!(loc.target(), "/news");
    }
}
