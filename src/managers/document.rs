//! Document Environment.
//!
//! Headless stand-in for the page's global resources: document-level key
//! listeners and the body scroll lock. Several overlays may hold the lock at
//! once; the body only unlocks when the last holder releases it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

/// Body overflow value while at least one lock is held.
pub const OVERFLOW_LOCKED: &str = "hidden";

/// Identifies an attached key listener.
pub type ListenerId = u64;

/// Callback invoked for every dispatched key event.
pub type KeyListener = Rc<dyn Fn(&KeyEvent)>;

/// A keyboard event as seen by document listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn escape() -> Self {
        Self::new("Escape")
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape" || self.key == "Esc"
    }
}

/// Trait defining the global document resources a view may touch.
pub trait Document {
    fn attach_key_listener(&self, listener: KeyListener) -> ListenerId;
    fn detach_key_listener(&self, id: ListenerId) -> bool;
    fn set_scroll_locked(&self, locked: bool);
    fn is_scroll_locked(&self) -> bool;
}

/// In-process document with a listener registry and a counted scroll lock.
#[derive(Default)]
pub struct DocumentEnvironment {
    listeners: RefCell<Vec<(ListenerId, KeyListener)>>,
    next_listener: Cell<ListenerId>,
    scroll_locks: Cell<usize>,
}

impl DocumentEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every attached listener and returns how many ran.
    ///
    /// The registry is snapshotted first, so listeners may attach or detach
    /// while the event is being delivered.
    pub fn dispatch_key(&self, event: &KeyEvent) -> usize {
        let snapshot: Vec<KeyListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn scroll_lock_count(&self) -> usize {
        self.scroll_locks.get()
    }

    /// Current body `overflow` style; empty means the default, scrollable page.
    pub fn body_overflow(&self) -> &'static str {
        if self.scroll_locks.get() > 0 {
            OVERFLOW_LOCKED
        } else {
            ""
        }
    }
}

impl Document for DocumentEnvironment {
    fn attach_key_listener(&self, listener: KeyListener) -> ListenerId {
        let id = self.next_listener.get() + 1;
        self.next_listener.set(id);
        self.listeners.borrow_mut().push((id, listener));
        debug!("Attached key listener {}", id);
        id
    }

    fn detach_key_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        let removed = listeners.len() != before;
        if removed {
            debug!("Detached key listener {}", id);
        }
        removed
    }

    fn set_scroll_locked(&self, locked: bool) {
        let count = self.scroll_locks.get();
        if locked {
            self.scroll_locks.set(count + 1);
        } else if count == 0 {
            warn!("Scroll unlock requested with no lock held");
        } else {
            self.scroll_locks.set(count - 1);
        }
    }

    fn is_scroll_locked(&self) -> bool {
        self.scroll_locks.get() > 0
    }
}
