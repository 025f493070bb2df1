//! Unit tests for the RecentSidebar view.
//!
//! These drive the sidebar through its public lifecycle (mount, props,
//! render, clicks, unmount) against an in-memory store and a headless
//! document, and check the rendered model plus the global resources held.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use recent_sidebar::managers::clock::{Clock, ManualClock};
use recent_sidebar::managers::document::{Document, DocumentEnvironment, KeyEvent};
use recent_sidebar::managers::navigator::HistoryNavigator;
use recent_sidebar::managers::recent_products_store::{RecentProductsStore, SharedStore};
use recent_sidebar::services::localization_engine::LocalizationEngine;
use recent_sidebar::storage::MemoryStorage;
use recent_sidebar::types::product::NewViewedProduct;
use recent_sidebar::types::settings::{BuildMode, Locale, SidebarSettings};
use recent_sidebar::ui::model::{SidebarBody, PANEL_Z_INDEX_CLOSED, PANEL_Z_INDEX_OPEN};
use recent_sidebar::ui::{RecentSidebar, SidebarContext, SidebarProps};

struct Harness {
    store: SharedStore,
    document: Rc<DocumentEnvironment>,
    navigator: Rc<HistoryNavigator>,
    clock: Rc<ManualClock>,
    closes: Rc<Cell<u32>>,
    on_close: Rc<dyn Fn()>,
    sidebar: RecentSidebar,
}

impl Harness {
    fn new(settings: SidebarSettings, storage: MemoryStorage, is_open: bool) -> Self {
        let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()));
        let store = RecentProductsStore::hydrate(Rc::new(storage), &settings.store, clock.clone()).into_shared();
        let document = Rc::new(DocumentEnvironment::new());
        let navigator = Rc::new(HistoryNavigator::new());
        let closes = Rc::new(Cell::new(0));
        let counter = closes.clone();

        let ctx = SidebarContext {
            store: store.clone(),
            document: document.clone(),
            navigator: navigator.clone(),
            clock: clock.clone(),
            localization: Rc::new(LocalizationEngine::bundled(settings.general.locale).unwrap()),
            settings,
        };
        let on_close: Rc<dyn Fn()> = Rc::new(move || counter.set(counter.get() + 1));
        let props = SidebarProps {
            is_open,
            on_close: on_close.clone(),
        };
        let mut sidebar = RecentSidebar::new(ctx, props);
        sidebar.mount();

        Self {
            store,
            document,
            navigator,
            clock,
            closes,
            on_close,
            sidebar,
        }
    }

    fn english(is_open: bool) -> Self {
        Self::new(english_settings(), MemoryStorage::new(), is_open)
    }

    fn view(&self, id: &str) {
        self.store
            .borrow_mut()
            .record_view(NewViewedProduct::new(
                id,
                format!("Product {}", id),
                format!("/img/{}.jpg", id),
                format!("/product/{}", id),
            ))
            .unwrap();
    }

    /// Re-sends props with the same callback, as a parent re-render would.
    fn set_open(&mut self, open: bool) {
        self.sidebar.set_props(SidebarProps {
            is_open: open,
            on_close: self.on_close.clone(),
        });
    }
}

fn english_settings() -> SidebarSettings {
    let mut settings = SidebarSettings::default();
    settings.general.locale = Locale::En;
    settings.general.utc_offset_minutes = 0;
    settings.general.build_mode = Some(BuildMode::Production);
    settings
}

/// An empty list renders the empty state and no count or clear affordance.
#[test]
fn test_empty_list_renders_empty_state() {
    let mut h = Harness::english(true);
    let model = h.sidebar.render();

    assert!(model.header.summary.is_none());
    assert_eq!(model.header.title, "Recent");
    match model.body {
        SidebarBody::Empty { icon, message } => {
            assert_eq!(icon, "👀");
            assert_eq!(message, "No recently viewed products");
        }
        SidebarBody::Items(_) => panic!("expected empty state"),
    }
}

/// N products show count N and the clear affordance; clearing empties the list.
#[test]
fn test_count_and_clear_all() {
    let mut h = Harness::english(true);
    h.view("1");
    h.view("2");
    h.view("3");

    let model = h.sidebar.render();
    let summary = model.header.summary.expect("summary shown for non-empty list");
    assert_eq!(summary.count, 3);
    assert_eq!(summary.count_label, "3 items");
    assert_eq!(summary.clear_label, "Clear all");
    let keys: Vec<&str> = model.body.rows().iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["3", "2", "1"]);

    assert!(h.sidebar.click_clear_all());
    let model = h.sidebar.render();
    assert!(model.body.is_empty());
    assert!(model.header.summary.is_none());
    assert!(h.store.borrow().recent_products().is_empty());

    // No affordance, nothing to do.
    assert!(!h.sidebar.click_clear_all());
}

/// The view follows store writes made after mount.
#[test]
fn test_rerenders_on_store_change() {
    let mut h = Harness::english(false);
    assert_eq!(h.sidebar.product_count(), 0);
    h.view("7");
    assert_eq!(h.sidebar.product_count(), 1);
    assert_eq!(h.sidebar.render().body.rows()[0].name, "Product 7");
}

/// Clicking a row navigates to its link exactly once and leaves the panel open.
#[test]
fn test_row_click_navigates_once() {
    let h = Harness::english(true);
    h.view("42");

    assert!(h.sidebar.click_product("42"));
    assert_eq!(h.navigator.history(), vec!["/product/42".to_string()]);
    assert_eq!(h.closes.get(), 0);
    assert!(h.sidebar.is_open());

    assert!(!h.sidebar.click_product("missing"));
    assert_eq!(h.navigator.history().len(), 1);
}

/// With close_on_navigate enabled, a row click also requests a close.
#[test]
fn test_close_on_navigate_setting() {
    let mut settings = english_settings();
    settings.sidebar.close_on_navigate = true;
    let h = Harness::new(settings, MemoryStorage::new(), true);
    h.view("42");

    assert!(h.sidebar.click_product("42"));
    assert_eq!(h.closes.get(), 1);
}

/// Escape while open calls on_close once; while closed nothing happens.
#[test]
fn test_escape_only_while_open() {
    let mut h = Harness::english(false);
    h.set_open(true);
    assert_eq!(h.document.dispatch_key(&KeyEvent::escape()), 1);
    assert_eq!(h.closes.get(), 1);

    h.document.dispatch_key(&KeyEvent::new("Enter"));
    assert_eq!(h.closes.get(), 1);

    h.set_open(false);
    assert_eq!(h.document.dispatch_key(&KeyEvent::escape()), 0);
    assert_eq!(h.closes.get(), 1);
}

/// Opening takes one listener and one lock; closing gives both back.
#[test]
fn test_open_close_resource_balance() {
    let mut h = Harness::english(false);
    assert_eq!(h.document.listener_count(), 0);
    assert!(!h.document.is_scroll_locked());

    h.set_open(true);
    assert_eq!(h.document.listener_count(), 1);
    assert_eq!(h.document.scroll_lock_count(), 1);
    assert_eq!(h.document.body_overflow(), "hidden");

    // Re-applying the same props does not stack resources.
    h.set_open(true);
    assert_eq!(h.document.listener_count(), 1);
    assert_eq!(h.document.scroll_lock_count(), 1);

    h.set_open(false);
    assert_eq!(h.document.listener_count(), 0);
    assert_eq!(h.document.scroll_lock_count(), 0);
    assert_eq!(h.document.body_overflow(), "");
}

/// Unmounting while open releases everything.
#[test]
fn test_unmount_while_open_leaves_nothing() {
    let mut h = Harness::english(true);
    assert_eq!(h.document.listener_count(), 1);
    h.sidebar.unmount();
    assert_eq!(h.document.listener_count(), 0);
    assert!(!h.document.is_scroll_locked());
    assert!(!h.sidebar.is_mounted());
}

/// Dropping the sidebar behaves like unmounting.
#[test]
fn test_drop_releases_resources() {
    let h = Harness::english(true);
    let document = h.document.clone();
    drop(h);
    assert_eq!(document.listener_count(), 0);
    assert_eq!(document.scroll_lock_count(), 0);
}

/// A new on_close while open swaps the listener without leaking.
#[test]
fn test_on_close_change_reattaches_listener() {
    let mut h = Harness::english(true);
    let replaced = Rc::new(Cell::new(0));
    let counter = replaced.clone();
    h.sidebar
        .set_props(SidebarProps::new(true, move || counter.set(counter.get() + 1)));

    assert_eq!(h.document.listener_count(), 1);
    assert_eq!(h.document.scroll_lock_count(), 1);

    h.document.dispatch_key(&KeyEvent::escape());
    assert_eq!(replaced.get(), 1);
    assert_eq!(h.closes.get(), 0);
}

/// Overlay exists only while open; close button always requests a close.
#[test]
fn test_overlay_and_close_button() {
    let mut h = Harness::english(false);
    let model = h.sidebar.render();
    assert!(!model.overlay_visible);
    assert_eq!(model.panel_z_index, PANEL_Z_INDEX_CLOSED);
    h.sidebar.click_overlay();
    assert_eq!(h.closes.get(), 0);

    h.set_open(true);
    let model = h.sidebar.render();
    assert!(model.overlay_visible);
    assert_eq!(model.panel_z_index, PANEL_Z_INDEX_OPEN);
    h.sidebar.click_overlay();
    h.sidebar.click_close();
    assert_eq!(h.closes.get(), 2);
}

/// Rows without image or link degrade instead of failing.
#[test]
fn test_malformed_rows_degrade() {
    let mut h = Harness::english(true);
    h.store
        .borrow_mut()
        .record_view(NewViewedProduct::new("9", "", "", "  "))
        .unwrap();

    let model = h.sidebar.render();
    let row = &model.body.rows()[0];
    assert_eq!(row.image, None);
    assert_eq!(row.link, None);
    assert_eq!(row.image_alt, "No image");

    assert!(!h.sidebar.click_product("9"));
    assert!(h.navigator.history().is_empty());
    assert!(h.sidebar.render_html().contains("img-placeholder"));
}

/// A corrupted persisted blob renders as an empty list.
#[test]
fn test_corrupted_storage_renders_empty() {
    let storage = MemoryStorage::with_item("recent-products-storage", "{not json");
    let mut h = Harness::new(english_settings(), storage, true);
    assert!(h.sidebar.render().body.is_empty());
}

/// Relative times are computed against the injected clock.
#[test]
fn test_row_time_labels() {
    let mut h = Harness::english(true);
    h.view("1");
    h.clock.advance(Duration::minutes(90));
    assert_eq!(h.sidebar.render().body.rows()[0].viewed_time, "1 hours ago");
    h.clock.advance(Duration::days(10));
    assert_eq!(h.sidebar.render().body.rows()[0].viewed_time, "6/15/2024");
    assert_eq!(h.clock.now(), Utc.with_ymd_and_hms(2024, 6, 25, 13, 30, 0).unwrap());
}

/// Korean locale renders the storefront's strings.
#[test]
fn test_korean_strings() {
    let mut settings = english_settings();
    settings.general.locale = Locale::Ko;
    let mut h = Harness::new(settings, MemoryStorage::new(), true);
    h.view("1");
    let model = h.sidebar.render();
    let summary = model.header.summary.unwrap();
    assert_eq!(summary.count_label, "1개");
    assert_eq!(summary.clear_label, "전체 삭제");
    assert_eq!(model.body.rows()[0].viewed_time, "방금 전");
}

/// The storage dump runs once per store change in development and never in production.
#[test]
fn test_diagnostics_gated_by_build_mode() {
    let mut prod = Harness::english(true);
    prod.view("1");
    prod.sidebar.render();
    assert_eq!(prod.sidebar.diagnostic_runs(), 0);

    let mut settings = english_settings();
    settings.general.build_mode = Some(BuildMode::Development);
    let mut dev = Harness::new(settings, MemoryStorage::new(), true);
    dev.sidebar.render();
    assert_eq!(dev.sidebar.diagnostic_runs(), 1);
    dev.sidebar.render();
    assert_eq!(dev.sidebar.diagnostic_runs(), 1);
    dev.view("1");
    dev.sidebar.render();
    assert_eq!(dev.sidebar.diagnostic_runs(), 2);
}

/// Two open sidebars share the scroll lock; closing one keeps the page locked.
#[test]
fn test_two_sidebars_share_scroll_lock() {
    let mut first = Harness::english(true);
    let document = first.document.clone();

    let settings = english_settings();
    let clock: Rc<dyn Clock> = first.clock.clone();
    let ctx = SidebarContext {
        store: first.store.clone(),
        document: document.clone(),
        navigator: first.navigator.clone(),
        clock,
        localization: Rc::new(LocalizationEngine::bundled(Locale::En).unwrap()),
        settings,
    };
    let mut second = RecentSidebar::new(ctx, SidebarProps::new(true, || {}));
    second.mount();
    assert_eq!(document.scroll_lock_count(), 2);
    assert_eq!(document.listener_count(), 2);

    first.set_open(false);
    assert!(document.is_scroll_locked());

    second.unmount();
    assert!(!document.is_scroll_locked());
    assert_eq!(document.listener_count(), 0);
}
