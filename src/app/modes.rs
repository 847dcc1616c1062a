//! Input modes.
//!
//! The mode decides how a key press is interpreted:
//!
//! - **Normal**: list navigation and commands
//! - **Search**: keystrokes edit the search box
//! - **Form**: keystrokes edit the create-note modal

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// `j`/`k` select, `h`/`l` page, `/` search, `n` new, `d` delete,
    /// `r` refresh, `q` close.
    #[default]
    Normal,

    /// Typing updates the raw search input; `Esc` or `Enter` returns to the
    /// list without touching the filter.
    Search,

    /// The create-note modal is open and has the keyboard.
    Form,
}
