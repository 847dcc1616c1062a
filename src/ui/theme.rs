//! Color schemes and ANSI escape sequences.
//!
//! Two Catppuccin flavors are built in (`catppuccin-mocha`, the default, and
//! `catppuccin-latte`). Custom themes are TOML files with the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! tag_fg = "#94e2d5"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! ```

use crate::domain::error::{NoteHubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MOCHA: &str = include_str!("../../themes/catppuccin-mocha.toml");
const LATTE: &str = include_str!("../../themes/catppuccin-latte.toml");

/// Complete theme definition with name and colors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Theme identifier, e.g. "catppuccin-mocha".
    pub name: String,
    /// Colors for every UI element.
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Header background, terminal default if `None`.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row text color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Titles and regular text.
    pub text_normal: String,
    /// Footer, excerpts, timestamps.
    pub text_dim: String,

    /// Table borders.
    pub border: String,
    /// Search box border, also used while the box has focus.
    pub search_bar_border: String,

    /// Text of matched characters in titles.
    pub match_highlight_fg: String,
    /// Background of matched characters in titles.
    pub match_highlight_bg: String,

    /// "No notes" panel.
    pub empty_state_fg: String,
    /// Tag column.
    pub tag_fg: String,

    /// Success toasts.
    pub success_fg: String,
    /// Error toasts, failed loads and form errors.
    pub error_fg: String,

    /// Border of the create-note modal; falls back to `search_bar_border`.
    #[serde(default)]
    pub modal_border: Option<String>,
}

impl Theme {
    /// Built-in theme by name, `None` if unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => MOCHA,
            "catppuccin-latte" => LATTE,
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Io`] if the file cannot be read and
    /// [`NoteHubError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a theme from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Theme`] on invalid TOML or missing colors.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| NoteHubError::Theme(e.to_string()))
    }

    #[must_use]
    pub fn modal_border(&self) -> &str {
        self.colors
            .modal_border
            .as_deref()
            .unwrap_or(&self.colors.search_bar_border)
    }

    /// `(r, g, b)` of a hex color; white when it does not parse.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// The built-in TOML is covered by tests; should it ever fail to parse the
    /// plugin still renders with a monochrome palette.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::monochrome)
    }
}

impl Theme {
    fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        let black = || "#000000".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                selection_fg: black(),
                selection_bg: white(),
                text_normal: white(),
                text_dim: "#808080".to_string(),
                border: "#808080".to_string(),
                search_bar_border: white(),
                match_highlight_fg: black(),
                match_highlight_bg: white(),
                empty_state_fg: white(),
                tag_fg: white(),
                success_fg: white(),
                error_fg: white(),
                modal_border: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::from_name("catppuccin-mocha").unwrap().name, "catppuccin-mocha");
        assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
        assert!(Theme::from_name("solarized").is_none());
        assert_eq!(Theme::default().name, "catppuccin-mocha");
    }

    #[test]
    fn theme_file_round_trips_through_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LATTE.replace("catppuccin-latte", "custom").as_bytes())
            .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn invalid_theme_is_a_theme_error() {
        assert!(matches!(Theme::from_toml("name = 1"), Err(NoteHubError::Theme(_))));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(NoteHubError::Io(_))
        ));
    }

    #[test]
    fn hex_colors_become_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn modal_border_falls_back_to_search_border() {
        let theme = Theme::default();
        assert_eq!(theme.modal_border(), theme.colors.search_bar_border);
    }
}
