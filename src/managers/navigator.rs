//! Route navigation seam.

use std::cell::RefCell;

use log::info;

/// Trait for anything that can move the app to an internal route.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Headless router that records every navigation in order.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: RefCell<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn current(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        info!("Navigating to {}", path);
        self.entries.borrow_mut().push(path.to_string());
    }
}
