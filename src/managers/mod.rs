// State managers
// Managers own stateful resources: the recent products store, the document, navigation, time.

pub mod clock;
pub mod document;
pub mod navigator;
pub mod recent_products_store;
