//! Screen components.
//!
//! Each component prints one region at a given row and returns the next free
//! row. [`render_layout`] stacks them:
//!
//! ```text
//! [blank]
//! [Header]
//! [Border]
//! [Search box, 3 lines]
//! [Status line]
//! [Table headers]
//! [Table rows | empty state]
//! ...
//! [Pagination]
//! [Toast]
//! [Border]
//! [Footer]
//! ```
//!
//! The create-note modal is drawn last, over the table.

mod empty;
mod footer;
mod form;
mod header;
mod pagination;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Rows used by everything except the table body.
pub const CHROME_ROWS: usize = 13;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut row = 2;

    row = header::render_header(row, &vm.header, theme, cols);
    row = render_border(row, &theme.colors.border, cols);
    row = search::render_search_bar(row, &vm.search_bar, theme, cols);
    row = status::render_status_line(row, vm.status.as_ref(), theme, cols);
    row = table::render_table_headers(row, theme);

    match &vm.empty_state {
        Some(empty) => empty::render_empty_state(row, empty, theme, cols),
        None => {
            table::render_table_rows(row, &vm.display_items, theme, cols);
        }
    }

    let footer_row = rows.saturating_sub(1).max(row);
    let border_row = footer_row - 1;
    let toast_row = border_row.saturating_sub(1);
    let pagination_row = toast_row.saturating_sub(1);

    pagination::render_pagination(pagination_row, vm.pagination.as_ref(), theme, cols);
    status::render_toast(toast_row, vm.toast.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(form) = &vm.form {
        form::render_form(form, theme, cols, rows);
    }
}
