//! Property-based tests for the sidebar's open/close lifecycle.
//!
//! For arbitrary sequences of prop changes and key presses, the sidebar holds
//! exactly one key listener and one scroll lock while open, none while
//! closed, and nothing at all after unmount.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use recent_sidebar::managers::clock::ManualClock;
use recent_sidebar::managers::document::{DocumentEnvironment, KeyEvent};
use recent_sidebar::managers::navigator::HistoryNavigator;
use recent_sidebar::managers::recent_products_store::RecentProductsStore;
use recent_sidebar::services::localization_engine::LocalizationEngine;
use recent_sidebar::storage::MemoryStorage;
use recent_sidebar::types::settings::{Locale, SidebarSettings};
use recent_sidebar::ui::{RecentSidebar, SidebarContext, SidebarProps};

#[derive(Debug, Clone)]
enum Step {
    Open,
    Close,
    /// New `on_close` callback with the current visibility.
    NewCallback,
    Key(&'static str),
    Render,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Open),
        Just(Step::Close),
        Just(Step::NewCallback),
        Just(Step::Key("Escape")),
        Just(Step::Key("Enter")),
        Just(Step::Render),
    ]
}

fn sidebar(document: Rc<DocumentEnvironment>, on_close: Rc<dyn Fn()>) -> RecentSidebar {
    let settings = SidebarSettings::default();
    let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()));
    let store = RecentProductsStore::hydrate(Rc::new(MemoryStorage::new()), &settings.store, clock.clone())
        .into_shared();
    let ctx = SidebarContext {
        store,
        document,
        navigator: Rc::new(HistoryNavigator::new()),
        clock,
        localization: Rc::new(LocalizationEngine::bundled(Locale::Ko).expect("bundled tables parse")),
        settings,
    };
    RecentSidebar::new(ctx, SidebarProps { is_open: false, on_close })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn resources_track_visibility(steps in proptest::collection::vec(arb_step(), 0..30)) {
        let document = Rc::new(DocumentEnvironment::new());
        let requests = Rc::new(Cell::new(0u32));
        let counter = requests.clone();
        let mut on_close: Rc<dyn Fn()> = Rc::new(move || counter.set(counter.get() + 1));
        let mut view = sidebar(document.clone(), on_close.clone());
        view.mount();

        for step in steps {
            match step {
                Step::Open => view.set_props(SidebarProps { is_open: true, on_close: on_close.clone() }),
                Step::Close => view.set_props(SidebarProps { is_open: false, on_close: on_close.clone() }),
                Step::NewCallback => {
                    let counter = requests.clone();
                    on_close = Rc::new(move || counter.set(counter.get() + 1));
                    view.set_props(SidebarProps { is_open: view.is_open(), on_close: on_close.clone() });
                }
                Step::Key(key) => {
                    let before = requests.get();
                    document.dispatch_key(&KeyEvent::new(key));
                    let expected = if key == "Escape" && view.is_open() { 1 } else { 0 };
                    prop_assert_eq!(requests.get() - before, expected);
                }
                Step::Render => {
                    let model = view.render();
                    prop_assert_eq!(model.overlay_visible, view.is_open());
                }
            }

            let held = if view.is_open() { 1 } else { 0 };
            prop_assert_eq!(document.listener_count(), held);
            prop_assert_eq!(document.scroll_lock_count(), held);
        }

        view.unmount();
        prop_assert_eq!(document.listener_count(), 0);
        prop_assert_eq!(document.scroll_lock_count(), 0);
    }
}
