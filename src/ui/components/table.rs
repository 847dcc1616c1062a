//! Note table.
//!
//! Four columns: TITLE, TAG, CREATED, and a content excerpt filling the rest
//! of the line.

use crate::ui::helpers::{self, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const TITLE_WIDTH: usize = 32;
const TAG_WIDTH: usize = 11;
const CREATED_WIDTH: usize = 10;

pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        " {:<TITLE_WIDTH$}{:<TAG_WIDTH$}{:<CREATED_WIDTH$}{}",
        "TITLE", "TAG", "CREATED", "CONTENT"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders one line per item and returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current, item| render_table_row(current, item, theme, cols))
}

/// Renders a row padded to the full width so the selection background spans
/// the line.
///
/// A note being deleted is dimmed until the list is re-fetched.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base_fg = if item.is_deleting {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    };

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(base_fg));
    }

    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(TITLE_WIDTH.saturating_sub(text_width(&item.title))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.tag_fg));
    }
    print!("{:<TAG_WIDTH$}", item.tag);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{:<CREATED_WIDTH$}", item.created);
    print!("{}", item.excerpt);

    let used = 1 + TITLE_WIDTH + TAG_WIDTH + CREATED_WIDTH + text_width(&item.excerpt);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}
