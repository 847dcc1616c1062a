//! Search box.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the three-line search box and returns the row below it.
///
/// ```text
///   ┌──────────────────────────┐
///   │ Search notes: milk▏    … │
///   └──────────────────────────┘
/// ```
///
/// The border uses `search_bar_border` while the box has focus and `border`
/// otherwise. A trailing `…` marks a term still waiting for its debounce
/// window.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let cursor = if search.is_focused { "▏" } else { "" };
    let mut text = format!(" Search notes: {}{cursor}", search.query);
    let indicator = if search.is_debouncing { " … " } else { "" };
    let budget = inner_width.saturating_sub(text_width(indicator));
    if text_width(&text) > budget {
        text = text.chars().take(budget).collect();
    }
    let padding = budget.saturating_sub(text_width(&text));

    position_cursor(row + 1, 1);
    print!("{margin}{}│", Theme::fg(border));
    if search.query.is_empty() && !search.is_focused {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{text}{}", " ".repeat(padding));
    print!("{}{indicator}", Theme::fg(&theme.colors.text_dim));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}
