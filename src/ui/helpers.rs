//! Shared rendering utilities.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `(row, col)`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width in terminal cells, counting one cell per character.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Prints `text` centered in `cols` cells, padding both sides.
pub fn print_centered(text: &str, cols: usize) {
    let width = text_width(text).min(cols);
    let left = cols.saturating_sub(width) / 2;
    print!("{}", " ".repeat(left));
    print!("{}", text.chars().take(width).collect::<String>());
    print!("{}", " ".repeat(cols.saturating_sub(left + width)));
}

/// Prints `text` with the character ranges in `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices with exclusive `end`, sorted
/// and non-overlapping. A selected row is printed plain so the selection
/// colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }

        print!("{}", chars[pos..start].iter().collect::<String>());
        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{}", chars[start..end].iter().collect::<String>());
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        pos = end;
    }

    print!("{}", chars[pos..].iter().collect::<String>());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_characters_not_bytes() {
        assert_eq!(text_width("café"), 4);
        assert_eq!(text_width(""), 0);
    }
}
