//! The shell's view host: an address bar with history stacks and a
//! recording document region.

use std::cell::RefCell;

use portal_core::{Location, ViewHost};

/// A headless document: current location, back/forward stacks, the
/// rendered content, and per-element text patches.
pub struct ShellHost {
    origin: String,
    current: RefCell<Location>,
    back_stack: RefCell<Vec<Location>>,
    forward_stack: RefCell<Vec<Location>>,
    content: RefCell<String>,
}

impl ShellHost {
    pub fn new(origin: &str, start: &str) -> Self {
        Self {
            origin: origin.to_string(),
            current: RefCell::new(Location::from_target(start)),
            back_stack: RefCell::new(Vec::new()),
            forward_stack: RefCell::new(Vec::new()),
            content: RefCell::new(String::new()),
        }
    }

    /// Move back one history entry. Returns `false` at the beginning
    /// of history. The caller must follow up with the router's
    /// pop-state entry point.
    pub fn history_back(&self) -> bool {
        let Some(previous) = self.back_stack.borrow_mut().pop() else {
            return false;
        };
        let current = self.current.replace(previous);
        self.forward_stack.borrow_mut().push(current);
        true
    }

    /// Move forward one history entry. Returns `false` at the end.
    pub fn history_forward(&self) -> bool {
        let Some(next) = self.forward_stack.borrow_mut().pop() else {
            return false;
        };
        let current = self.current.replace(next);
        self.back_stack.borrow_mut().push(current);
        true
    }

    /// The rendered document region.
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }
}

impl ViewHost for ShellHost {
    fn location(&self) -> Location {
        self.current.borrow().clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn push_url(&self, target: &str) {
        let next = Location::from_target(target);
        let current = self.current.replace(next);
        self.back_stack.borrow_mut().push(current);
        self.forward_stack.borrow_mut().clear();
    }

    fn replace_url(&self, target: &str) {
        *self.current.borrow_mut() = Location::from_target(target);
    }

    fn clear_content(&self) {
        self.content.borrow_mut().clear();
    }

    fn set_content(&self, markup: &str) {
        *self.content.borrow_mut() = markup.to_string();
    }

    fn set_text(&self, element_id: &str, text: &str) {
        // Patch the element in place; if it is no longer in the
        // rendered content this is a no-op, like a vanished DOM node.
        let mut guard = self.content.borrow_mut();
        let content: &mut String = &mut guard;
        let marker = format!("id=\"{element_id}\"");
        let Some(start) = content.find(&marker) else {
            log::debug!("set_text: no element {element_id} in current content");
            return;
        };
        let Some(open_end) = content[start..].find('>').map(|i| start + i + 1) else {
            return;
        };
        let Some(close) = content[open_end..].find('<').map(|i| open_end + i) else {
            return;
        };
        content.replace_range(open_end..close, text);
    }

    fn scroll_to_top(&self) {}
}
