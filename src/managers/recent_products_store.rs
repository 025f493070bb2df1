//! Recent Products Store.
//!
//! Implements `RecentProductsStoreTrait`: recording product views, listing
//! them most-recent first, and clearing them, persisted as a JSON blob in
//! local storage under a fixed key.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::managers::clock::Clock;
use crate::storage::KeyValueStorage;
use crate::types::errors::StoreError;
use crate::types::product::{NewViewedProduct, ViewedProduct};
use crate::types::settings::StoreSettings;

/// Handle returned by `subscribe`, used to unsubscribe.
pub type SubscriptionId = u64;

/// Receives the full list after every mutation.
pub type StoreListener = Box<dyn Fn(&[ViewedProduct])>;

/// Store handle shared between writers and views.
pub type SharedStore = Rc<RefCell<dyn RecentProductsStoreTrait>>;

/// Version written into the persisted envelope.
const PERSIST_VERSION: u32 = 0;

/// Trait defining recent products store operations.
///
/// Listeners run while the store is mutably borrowed and must not call
/// back into it.
pub trait RecentProductsStoreTrait {
    fn recent_products(&self) -> Vec<ViewedProduct>;
    fn record_view(&mut self, product: NewViewedProduct) -> Result<(), StoreError>;
    fn remove(&mut self, id: &str) -> Result<bool, StoreError>;
    fn clear_all(&mut self) -> Result<(), StoreError>;
    fn subscribe(&mut self, listener: StoreListener) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
    fn persisted_blob(&self) -> Option<String>;
}

#[derive(Serialize)]
struct PersistedEnvelope<'a> {
    state: PersistedState<'a>,
    version: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState<'a> {
    recent_products: &'a [ViewedProduct],
}

#[derive(Deserialize)]
struct StoredEnvelope {
    state: StoredState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    #[serde(default)]
    recent_products: Vec<Value>,
}

/// Recently viewed products, newest first, capped at `max_items`.
pub struct RecentProductsStore {
    storage: Rc<dyn KeyValueStorage>,
    storage_key: String,
    max_items: usize,
    clock: Rc<dyn Clock>,
    products: Vec<ViewedProduct>,
    listeners: Vec<(SubscriptionId, StoreListener)>,
    next_subscription: SubscriptionId,
}

impl RecentProductsStore {
    /// Creates the store and loads whatever is persisted under the storage key.
    ///
    /// A missing or unreadable blob yields an empty list; this never fails.
    pub fn hydrate(
        storage: Rc<dyn KeyValueStorage>,
        settings: &StoreSettings,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let max_items = settings.max_items.max(1);
        let products = Self::load(storage.as_ref(), &settings.storage_key, max_items);
        debug!(
            "Hydrated {} recent products from '{}'",
            products.len(),
            settings.storage_key
        );
        Self {
            storage,
            storage_key: settings.storage_key.clone(),
            max_items,
            clock,
            products,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Wraps the store in a shareable handle.
    pub fn into_shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn load(storage: &dyn KeyValueStorage, key: &str, max_items: usize) -> Vec<ViewedProduct> {
        let raw = match storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read '{}' from storage: {}", key, e);
                return Vec::new();
            }
        };

        let envelope: StoredEnvelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Discarding corrupted recent products blob '{}': {}", key, e);
                return Vec::new();
            }
        };

        let mut products: Vec<ViewedProduct> = Vec::new();
        for value in envelope.state.recent_products {
            match serde_json::from_value::<ViewedProduct>(value) {
                Ok(product) if product.id.is_empty() => {
                    warn!("Skipping stored product without an id");
                }
                Ok(product) => {
                    if products.iter().any(|p| p.id == product.id) {
                        continue;
                    }
                    products.push(product);
                }
                Err(e) => warn!("Skipping malformed stored product: {}", e),
            }
        }
        products.truncate(max_items);
        products
    }

    fn persist(&self) -> Result<(), StoreError> {
        let envelope = PersistedEnvelope {
            state: PersistedState {
                recent_products: &self.products,
            },
            version: PERSIST_VERSION,
        };
        let json = serde_json::to_string(&envelope)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.storage.set_item(&self.storage_key, &json)?;
        Ok(())
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.products);
        }
    }

    /// Persists, then notifies. Listeners see the new list even when the
    /// write failed; the failure is still reported to the caller.
    fn commit(&self) -> Result<(), StoreError> {
        let persisted = self.persist();
        if let Err(e) = &persisted {
            warn!("{}", e);
        }
        self.notify();
        persisted
    }
}

impl RecentProductsStoreTrait for RecentProductsStore {
    fn recent_products(&self) -> Vec<ViewedProduct> {
        self.products.clone()
    }

    /// Records a view. A product already in the list is moved to the front
    /// with a fresh timestamp instead of being duplicated; the oldest entries
    /// beyond `max_items` are evicted.
    fn record_view(&mut self, product: NewViewedProduct) -> Result<(), StoreError> {
        if product.id.trim().is_empty() {
            return Err(StoreError::InvalidId(
                "Product id cannot be empty".to_string(),
            ));
        }

        self.products.retain(|p| p.id != product.id);
        let viewed = product.stamp(self.clock.now());
        self.products.insert(0, viewed);
        self.products.truncate(self.max_items);

        self.commit()
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    /// Empties the whole list in one step.
    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.products.clear();
        self.commit()
    }

    fn subscribe(&mut self, listener: StoreListener) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn persisted_blob(&self) -> Option<String> {
        match self.storage.get_item(&self.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read '{}' from storage: {}", self.storage_key, e);
                None
            }
        }
    }
}
