// Sidebar view layer
// `sidebar` drives state and effects, `model` describes a frame, `markup` emits HTML.

pub mod markup;
pub mod model;
pub mod sidebar;

pub use sidebar::{RecentSidebar, SidebarContext, SidebarProps};
