//! Page indicator.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `‹ 1 [2] 3 … 9 ›` centered, with arrows dimmed at either end.
pub fn render_pagination(row: usize, pagination: Option<&PaginationInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match pagination {
        Some(info) => {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print_centered(&page_strip(info), cols);
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }
    row + 1
}

/// First, last, and the current page with its neighbours; gaps become `…`.
///
/// Only the shown pages are visited, so the cost does not depend on `total`.
fn page_strip(info: &PaginationInfo) -> String {
    let PaginationInfo { current, total } = *info;
    let total = total.max(1);
    let current = current.clamp(1, total);

    let mut pages = vec![1, current.saturating_sub(1), current, current.saturating_add(1), total];
    pages.retain(|page| (1..=total).contains(page));
    pages.sort_unstable();
    pages.dedup();

    let mut parts = vec![if current > 1 { "‹" } else { " " }.to_string()];
    let mut last_shown = 0;
    for page in pages {
        if last_shown != 0 && page > last_shown + 1 {
            parts.push("…".to_string());
        }
        parts.push(if page == current {
            format!("[{page}]")
        } else {
            page.to_string()
        });
        last_shown = page;
    }

    parts.push(if current < total { "›" } else { " " }.to_string());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_collapses_distant_pages() {
        let strip = page_strip(&PaginationInfo { current: 5, total: 9 });
        assert_eq!(strip, "‹ 1 … 4 [5] 6 … 9 ›");
    }

    #[test]
    fn strip_hides_arrows_at_ends() {
        assert_eq!(page_strip(&PaginationInfo { current: 1, total: 2 }), "  [1] 2 ›");
        assert_eq!(page_strip(&PaginationInfo { current: 2, total: 2 }), "‹ 1 [2]  ");
    }

    #[test]
    fn strip_handles_huge_page_counts() {
        let strip = page_strip(&PaginationInfo { current: u32::MAX, total: u32::MAX });
        assert_eq!(strip, format!("‹ 1 … {} [{}]  ", u32::MAX - 1, u32::MAX));

        let strip = page_strip(&PaginationInfo { current: 1, total: 4_000_000_000 });
        assert_eq!(strip, "  [1] 2 … 4000000000 ›");
    }
}
