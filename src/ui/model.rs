//! Render model for the recent products sidebar.
//!
//! A plain description of what the panel shows; `markup` turns it into HTML.

/// Stacking order of the dimmed backdrop.
pub const OVERLAY_Z_INDEX: u32 = 1000;
/// Panel stacking order while closed.
pub const PANEL_Z_INDEX_CLOSED: u32 = 1000;
/// Panel stacking order while open, one above the overlay.
pub const PANEL_Z_INDEX_OPEN: u32 = 1001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarModel {
    /// Only rendered while open.
    pub overlay_visible: bool,
    pub panel_open: bool,
    pub panel_z_index: u32,
    pub header: HeaderModel,
    pub body: SidebarBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderModel {
    pub title: String,
    pub close_label: String,
    /// Count and "clear all"; absent for an empty list.
    pub summary: Option<HeaderSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSummary {
    pub count: usize,
    pub count_label: String,
    pub clear_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarBody {
    Empty { icon: String, message: String },
    Items(Vec<ProductRow>),
}

impl SidebarBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, SidebarBody::Empty { .. })
    }

    pub fn rows(&self) -> &[ProductRow] {
        match self {
            SidebarBody::Items(rows) => rows,
            SidebarBody::Empty { .. } => &[],
        }
    }
}

/// One product line. `key` is the product id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub key: String,
    pub viewed_time: String,
    /// `None` renders the image placeholder.
    pub image: Option<String>,
    pub image_alt: String,
    pub name: String,
    /// `None` makes the row inert.
    pub link: Option<String>,
}
