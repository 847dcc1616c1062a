//! Create-note modal.
//!
//! Drawn as a bordered box over the middle of the pane, one row per field
//! with its validation error underneath, then the server error (if any) and
//! the submit state.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldInfo, FormInfo};

const MODAL_MAX_WIDTH: usize = 72;
const LABEL_WIDTH: usize = 9;

/// Rows taken by the modal: borders, title, a value and error row per field,
/// the server error and the submit line.
#[must_use]
pub fn modal_height(form: &FormInfo) -> usize {
    2 + 2 + form.fields.len() * 2 + 2
}

pub fn render_form(form: &FormInfo, theme: &Theme, cols: usize, rows: usize) {
    let width = cols.saturating_sub(4).min(MODAL_MAX_WIDTH).max(20);
    let inner = width - 2;
    let left = cols.saturating_sub(width) / 2 + 1;
    let top = rows.saturating_sub(modal_height(form)) / 2 + 1;
    let border = Theme::fg(theme.modal_border());

    let line = |row: usize, body: &str, color: &str| {
        position_cursor(row, left);
        print!("{border}│{}{color}", Theme::reset());
        let cut: String = body.chars().take(inner).collect();
        print!("{cut}{}", " ".repeat(inner.saturating_sub(text_width(&cut))));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
    };

    position_cursor(top, left);
    print!("{border}┌{}┐{}", "─".repeat(inner), Theme::reset());

    let mut row = top + 1;
    line(row, " New note", &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)));
    row += 1;
    line(row, "", "");
    row += 1;

    for field in &form.fields {
        line(row, &field_line(field, inner), &field_color(field, theme));
        row += 1;
        let error = field
            .error
            .as_ref()
            .map_or_else(String::new, |e| format!(" {:LABEL_WIDTH$}{e}", ""));
        line(row, &error, &Theme::fg(&theme.colors.error_fg));
        row += 1;
    }

    let server_error = form
        .server_error
        .as_ref()
        .map_or_else(String::new, |e| format!(" {e}"));
    line(row, &server_error, &Theme::fg(&theme.colors.error_fg));
    row += 1;

    let submit = if form.submitting {
        " Creating note..."
    } else {
        " Enter: Create note    Esc: Cancel"
    };
    line(row, submit, &Theme::fg(&theme.colors.text_dim));
    row += 1;

    position_cursor(row, left);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}

/// ` Title:   value▏`, keeping the end of the value visible when it overflows.
fn field_line(field: &FormFieldInfo, inner: usize) -> String {
    let prefix = format!(" {:<LABEL_WIDTH$}", format!("{}:", field.label));
    let cursor = if field.is_focused { "▏" } else { "" };
    let budget = inner.saturating_sub(text_width(&prefix) + text_width(cursor) + 1);

    let value = field.value.replace('\n', " ");
    let len = text_width(&value);
    let visible: String = value.chars().skip(len.saturating_sub(budget)).collect();
    format!("{prefix}{visible}{cursor}")
}

fn field_color(field: &FormFieldInfo, theme: &Theme) -> String {
    if field.is_focused {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    } else {
        Theme::fg(&theme.colors.text_dim)
    }
}
