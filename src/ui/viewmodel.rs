//! Display-ready snapshot of the application state.
//!
//! Built by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. Nothing in here knows about the cache or
//! the API; strings are already truncated and formatted.

use crate::app::Notification;

#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,

    /// Rows of the note table inside the visible window.
    pub display_items: Vec<DisplayItem>,
    /// Selected row relative to the window.
    pub selected_index: usize,

    /// Present when the visible result spans more than one page.
    pub pagination: Option<PaginationInfo>,
    /// Loading or error line.
    pub status: Option<StatusInfo>,
    /// Present when a settled page has no notes.
    pub empty_state: Option<EmptyState>,
    pub toast: Option<Notification>,
    /// Create-note modal, drawn over the table.
    pub form: Option<FormInfo>,

    pub footer: FooterInfo,
}

/// One row of the note table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub tag: String,
    /// Content flattened to one line and cut to the remaining width.
    pub excerpt: String,
    /// Relative creation time ("3h ago").
    pub created: String,
    pub is_selected: bool,
    /// A delete for this note is in flight.
    pub is_deleting: bool,
    /// `(start, end)` character ranges of the title matching the search term.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Raw search box contents.
    pub query: String,
    pub is_focused: bool,
    /// A term is waiting for its debounce window.
    pub is_debouncing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct FormInfo {
    /// Title, content and tag, in focus order.
    pub fields: Vec<FormFieldInfo>,
    pub submitting: bool,
    pub server_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormFieldInfo {
    pub label: &'static str,
    pub value: String,
    pub is_focused: bool,
    pub error: Option<String>,
}
