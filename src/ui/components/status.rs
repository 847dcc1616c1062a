//! Status and toast lines.

use crate::app::{Notification, NotificationKind};
use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Loading or error line above the table. Blank when there is nothing to say.
pub fn render_status_line(row: usize, status: Option<&StatusInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_dim
    };
    let text = format!(" {}", status.message);
    print!("{}{text}", Theme::fg(color));
    print!("{}{}", " ".repeat(cols.saturating_sub(text_width(&text))), Theme::reset());
    row + 1
}

/// Last notification, colored by kind.
pub fn render_toast(row: usize, toast: Option<&Notification>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(toast) = toast else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let (color, icon) = match toast.kind {
        NotificationKind::Success => (&theme.colors.success_fg, "✔"),
        NotificationKind::Error => (&theme.colors.error_fg, "✘"),
    };
    let text = format!(" {icon} {}", toast.message);
    print!("{}{}{text}", Theme::bold(), Theme::fg(color));
    print!("{}{}", " ".repeat(cols.saturating_sub(text_width(&text))), Theme::reset());
    row + 1
}
