//! Terminal UI.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI output
//! ```
//!
//! - [`viewmodel`]: Display-ready snapshot types
//! - [`renderer`]: Entry point called from the plugin's `render`
//! - [`components`]: Header, search box, table, pagination, toast, modal
//! - [`helpers`]: Cursor positioning and match highlighting
//! - [`theme`]: Color schemes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, FormFieldInfo, FormInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, StatusInfo, UIViewModel,
};
