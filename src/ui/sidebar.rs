//! Recent products sidebar.
//!
//! A slide-out panel over the page listing recently viewed products. The
//! caller owns the open/closed state and passes it in through
//! [`SidebarProps`]; the sidebar only ever asks to be closed via `on_close`.
//!
//! While open, the sidebar holds two global resources from the
//! [`Document`]: an Escape key listener and a scroll lock. Both are
//! acquired and released together, and the previous pair is always
//! released before a new pair is acquired, so at most one of each is held
//! per sidebar at any time.
//!
//! `on_close` may be invoked from inside `click_*` calls and from key
//! dispatch. It should record the request (for example in a `Cell`) rather
//! than borrow the sidebar again.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use super::markup;
use super::model::{
    HeaderModel, HeaderSummary, ProductRow, SidebarBody, SidebarModel, PANEL_Z_INDEX_CLOSED,
    PANEL_Z_INDEX_OPEN,
};
use crate::managers::clock::Clock;
use crate::managers::document::{Document, KeyEvent, ListenerId};
use crate::managers::navigator::Navigator;
use crate::managers::recent_products_store::{SharedStore, StoreListener, SubscriptionId};
use crate::services::localization_engine::{LocalizationEngine, LocalizationEngineTrait};
use crate::services::relative_time::{format_viewed_at, zone_from_minutes};
use crate::types::product::ViewedProduct;
use crate::types::settings::{BuildMode, SidebarSettings};

/// Log target of the development-only storage dump.
pub const DIAGNOSTICS_TARGET: &str = "recent_sidebar::diagnostics";

/// Close request callback. Must tolerate being called when already closed.
pub type OnClose = Rc<dyn Fn()>;

/// Inputs owned by the caller.
#[derive(Clone)]
pub struct SidebarProps {
    pub is_open: bool,
    pub on_close: OnClose,
}

impl SidebarProps {
    pub fn new(is_open: bool, on_close: impl Fn() + 'static) -> Self {
        Self {
            is_open,
            on_close: Rc::new(on_close),
        }
    }

    /// Same callback, different visibility.
    pub fn with_open(&self, is_open: bool) -> Self {
        Self {
            is_open,
            on_close: Rc::clone(&self.on_close),
        }
    }
}

impl fmt::Debug for SidebarProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarProps")
            .field("is_open", &self.is_open)
            .finish_non_exhaustive()
    }
}

/// Collaborators the sidebar reads from and acts on.
pub struct SidebarContext {
    pub store: SharedStore,
    pub document: Rc<dyn Document>,
    pub navigator: Rc<dyn Navigator>,
    pub clock: Rc<dyn Clock>,
    pub localization: Rc<LocalizationEngine>,
    pub settings: SidebarSettings,
}

/// Resources held while the panel is open.
struct OpenEffect {
    key_listener: ListenerId,
}

pub struct RecentSidebar {
    ctx: SidebarContext,
    build_mode: BuildMode,
    props: SidebarProps,
    products: Rc<RefCell<Vec<ViewedProduct>>>,
    /// Bumped on every store change.
    revision: Rc<Cell<u64>>,
    diagnosed_revision: Option<u64>,
    diagnostic_runs: u64,
    subscription: Option<SubscriptionId>,
    open_effect: Option<OpenEffect>,
    mounted: bool,
}

impl RecentSidebar {
    pub fn new(ctx: SidebarContext, props: SidebarProps) -> Self {
        let build_mode = ctx.settings.effective_build_mode();
        Self {
            ctx,
            build_mode,
            props,
            products: Rc::new(RefCell::new(Vec::new())),
            revision: Rc::new(Cell::new(0)),
            diagnosed_revision: None,
            diagnostic_runs: 0,
            subscription: None,
            open_effect: None,
            mounted: false,
        }
    }

    /// Subscribes to the store and, if already open, acquires the open-state
    /// resources. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let products = Rc::clone(&self.products);
        let revision = Rc::clone(&self.revision);
        let listener: StoreListener = Box::new(move |list: &[ViewedProduct]| {
            *products.borrow_mut() = list.to_vec();
            revision.set(revision.get() + 1);
        });

        match self.ctx.store.try_borrow_mut() {
            Ok(mut store) => {
                *self.products.borrow_mut() = store.recent_products();
                self.subscription = Some(store.subscribe(listener));
            }
            Err(_) => warn!("Recent products store is busy; mounting with an empty list"),
        }
        self.revision.set(self.revision.get() + 1);

        self.setup_open_effect();
    }

    /// Releases every global resource and the store subscription.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.teardown_open_effect();
        if let Some(id) = self.subscription.take() {
            match self.ctx.store.try_borrow_mut() {
                Ok(mut store) => {
                    store.unsubscribe(id);
                }
                Err(_) => warn!("Recent products store is busy; subscription {} leaked", id),
            }
        }
        self.mounted = false;
    }

    /// Applies new props. A change in visibility or in the `on_close`
    /// callback releases the old open-state resources before acquiring new ones.
    pub fn set_props(&mut self, props: SidebarProps) {
        let changed = props.is_open != self.props.is_open
            || !Rc::ptr_eq(&props.on_close, &self.props.on_close);
        if !changed || !self.mounted {
            self.props = props;
            return;
        }
        self.teardown_open_effect();
        self.props = props;
        self.setup_open_effect();
    }

    fn setup_open_effect(&mut self) {
        if !self.props.is_open || self.open_effect.is_some() {
            return;
        }
        let on_close = Rc::clone(&self.props.on_close);
        let key_listener = self
            .ctx
            .document
            .attach_key_listener(Rc::new(move |event: &KeyEvent| {
                if event.is_escape() {
                    on_close();
                }
            }));
        self.ctx.document.set_scroll_locked(true);
        self.open_effect = Some(OpenEffect { key_listener });
    }

    fn teardown_open_effect(&mut self) {
        if let Some(effect) = self.open_effect.take() {
            self.ctx.document.detach_key_listener(effect.key_listener);
            self.ctx.document.set_scroll_locked(false);
        }
    }

    /// Builds the render model, then runs post-render effects.
    pub fn render(&mut self) -> SidebarModel {
        let model = self.build_model();
        self.run_diagnostics();
        model
    }

    /// Renders straight to HTML.
    pub fn render_html(&mut self) -> String {
        markup::render_html(&self.render())
    }

    fn build_model(&self) -> SidebarModel {
        let products = self.products.borrow();
        let l10n = self.ctx.localization.as_ref();
        let is_open = self.props.is_open;

        let summary = if products.is_empty() {
            None
        } else {
            Some(HeaderSummary {
                count: products.len(),
                count_label: l10n.plural("sidebar.count", products.len() as u64, None),
                clear_label: l10n.t("sidebar.clear_all", None),
            })
        };

        let body = if products.is_empty() {
            SidebarBody::Empty {
                icon: l10n.t("sidebar.empty_icon", None),
                message: l10n.t("sidebar.empty", None),
            }
        } else {
            let now = self.ctx.clock.now();
            let zone = zone_from_minutes(self.ctx.settings.general.utc_offset_minutes);
            let rows = products
                .iter()
                .map(|product| ProductRow {
                    key: product.id.clone(),
                    viewed_time: format_viewed_at(product.viewed_at, now, zone, l10n),
                    image: product.has_image().then(|| product.image.clone()),
                    image_alt: if product.name.is_empty() {
                        l10n.t("sidebar.image_missing", None)
                    } else {
                        product.name.clone()
                    },
                    name: product.name.clone(),
                    link: product.has_link().then(|| product.link.clone()),
                })
                .collect();
            SidebarBody::Items(rows)
        };

        SidebarModel {
            overlay_visible: is_open,
            panel_open: is_open,
            panel_z_index: if is_open {
                PANEL_Z_INDEX_OPEN
            } else {
                PANEL_Z_INDEX_CLOSED
            },
            header: HeaderModel {
                title: l10n.t("sidebar.title", None),
                close_label: l10n.t("sidebar.close", None),
                summary,
            },
            body,
        }
    }

    /// Development builds dump the raw persisted blob once per store change.
    fn run_diagnostics(&mut self) {
        let revision = self.revision.get();
        if self.diagnosed_revision == Some(revision) {
            return;
        }
        self.diagnosed_revision = Some(revision);
        if !self.build_mode.is_development() {
            return;
        }

        let blob = match self.ctx.store.try_borrow() {
            Ok(store) => store.persisted_blob(),
            Err(_) => None,
        };
        self.diagnostic_runs += 1;
        debug!(
            target: DIAGNOSTICS_TARGET,
            "Stored data: {}",
            blob.as_deref().unwrap_or("null")
        );
    }

    /// Overlay click. The overlay only exists while open.
    pub fn click_overlay(&self) {
        if self.props.is_open {
            (self.props.on_close)();
        }
    }

    /// Close button click.
    pub fn click_close(&self) {
        (self.props.on_close)();
    }

    /// "Clear all" click. Returns false when the affordance is not shown.
    pub fn click_clear_all(&self) -> bool {
        if self.products.borrow().is_empty() {
            return false;
        }
        match self.ctx.store.try_borrow_mut() {
            Ok(mut store) => {
                if let Err(e) = store.clear_all() {
                    warn!("Clearing recent products did not persist: {}", e);
                }
                true
            }
            Err(_) => {
                warn!("Recent products store is busy; clear ignored");
                false
            }
        }
    }

    /// Product row click. Navigates to the row's link and returns true;
    /// unknown ids and rows without a link do nothing.
    pub fn click_product(&self, id: &str) -> bool {
        let link = self
            .products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .filter(|p| p.has_link())
            .map(|p| p.link.clone());

        let Some(link) = link else {
            debug!("Ignoring click on product '{}' with no link", id);
            return false;
        };

        self.ctx.navigator.navigate(&link);
        if self.ctx.settings.sidebar.close_on_navigate && self.props.is_open {
            (self.props.on_close)();
        }
        true
    }

    pub fn is_open(&self) -> bool {
        self.props.is_open
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn product_count(&self) -> usize {
        self.products.borrow().len()
    }

    /// How many times the storage dump has run.
    pub fn diagnostic_runs(&self) -> u64 {
        self.diagnostic_runs
    }
}

impl Drop for RecentSidebar {
    fn drop(&mut self) {
        self.unmount();
    }
}
