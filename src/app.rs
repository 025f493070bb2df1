//! App Core.
//!
//! Holds the store, the environment adapters and the sidebar, and owns the
//! sidebar's open/closed state the way a page component would.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use log::{info, warn};

use crate::database::connection::Database;
use crate::managers::clock::{Clock, SystemClock};
use crate::managers::document::{DocumentEnvironment, KeyEvent};
use crate::managers::navigator::HistoryNavigator;
use crate::managers::recent_products_store::{RecentProductsStore, SharedStore};
use crate::services::localization_engine::LocalizationEngine;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::storage::{KeyValueStorage, SqliteStorage};
use crate::types::errors::StoreError;
use crate::types::product::NewViewedProduct;
use crate::types::settings::SidebarSettings;
use crate::ui::model::SidebarModel;
use crate::ui::sidebar::OnClose;
use crate::ui::{RecentSidebar, SidebarContext, SidebarProps};

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub settings: SidebarSettings,
    pub store: SharedStore,
    pub document: Rc<DocumentEnvironment>,
    pub navigator: Rc<HistoryNavigator>,
    pub sidebar: RecentSidebar,
    close_requested: Rc<Cell<bool>>,
    on_close: OnClose,
}

impl App {
    /// Opens the database at `db_path`, loads settings (defaults on any
    /// error) and mounts a closed sidebar.
    pub fn new(db_path: &Path, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Arc::new(Database::open(db_path)?);

        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = match settings_engine.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Using default settings: {}", e);
                SidebarSettings::default()
            }
        };

        Self::assemble(db, settings, Rc::new(SystemClock))
    }

    /// Builds an app over an in-memory database.
    pub fn in_memory(settings: SidebarSettings, clock: Rc<dyn Clock>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open_in_memory()?);
        Self::assemble(db, settings, clock)
    }

    fn assemble(
        db: Arc<Database>,
        settings: SidebarSettings,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let storage: Rc<dyn KeyValueStorage> = Rc::new(SqliteStorage::new(Arc::clone(&db)));
        let store = RecentProductsStore::hydrate(storage, &settings.store, Rc::clone(&clock)).into_shared();
        let localization = Rc::new(LocalizationEngine::bundled(settings.general.locale)?);
        let document = Rc::new(DocumentEnvironment::new());
        let navigator = Rc::new(HistoryNavigator::new());

        let close_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&close_requested);
        let props = SidebarProps::new(false, move || flag.set(true));

        let ctx = SidebarContext {
            store: Rc::clone(&store),
            document: document.clone(),
            navigator: navigator.clone(),
            clock,
            localization,
            settings: settings.clone(),
        };
        let on_close = Rc::clone(&props.on_close);
        let mut sidebar = RecentSidebar::new(ctx, props);
        sidebar.mount();

        info!(
            "Recent sidebar ready ({} products, locale {})",
            sidebar.product_count(),
            settings.general.locale.code()
        );

        Ok(Self {
            db,
            settings,
            store,
            document,
            navigator,
            sidebar,
            close_requested,
            on_close,
        })
    }

    /// The write path used by product detail pages.
    pub fn view_product(&self, product: NewViewedProduct) -> Result<(), StoreError> {
        self.store.borrow_mut().record_view(product)
    }

    pub fn open_sidebar(&mut self) {
        self.set_open(true);
    }

    pub fn close_sidebar(&mut self) {
        self.set_open(false);
    }

    pub fn toggle_sidebar(&mut self) {
        let open = self.sidebar.is_open();
        self.set_open(!open);
    }

    fn set_open(&mut self, open: bool) {
        self.close_requested.set(false);
        let props = self.current_props().with_open(open);
        self.sidebar.set_props(props);
    }

    /// Props reuse one callback; a new callback identity would re-attach
    /// the key listener.
    fn current_props(&self) -> SidebarProps {
        SidebarProps {
            is_open: self.sidebar.is_open(),
            on_close: Rc::clone(&self.on_close),
        }
    }

    /// Applies a pending close request raised by the sidebar. Returns true
    /// when the sidebar was closed.
    pub fn process_close_requests(&mut self) -> bool {
        if !self.close_requested.replace(false) {
            return false;
        }
        if !self.sidebar.is_open() {
            return false;
        }
        self.close_sidebar();
        true
    }

    /// Dispatches a key press to the document, then applies any close request.
    pub fn press_key(&mut self, key: &str) -> bool {
        self.document.dispatch_key(&KeyEvent::new(key));
        self.process_close_requests()
    }

    pub fn render(&mut self) -> SidebarModel {
        self.sidebar.render()
    }

    pub fn render_html(&mut self) -> String {
        self.sidebar.render_html()
    }

    /// Releases the sidebar's global resources.
    pub fn shutdown(&mut self) {
        self.sidebar.unmount();
    }
}
