//! Colors and the ANSI escapes built from them.
//!
//! Two palettes ship with the plugin, `catppuccin-mocha` (dark, the default)
//! and `catppuccin-latte` (light). A custom palette is a TOML file of the
//! same shape:
//!
//! ```toml
//! name = "reqres-night"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! # header_bg = "#181825"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#6c7086"
//! search_bar_focus = "#f5c2e7"
//! searched_fg = "#1e1e2e"
//! searched_bg = "#f9e2af"
//! placeholder_fg = "#89b4fa"
//! badge_fg = "#a6e3a1"
//! toast_fg = "#1e1e2e"
//! toast_bg = "#f38ba8"
//! ```
//!
//! Every key except `header_bg` is required.
//!
//! ```rust
//! use userdeck::ui::theme::Theme;
//!
//! assert_eq!(Theme::fg("#ffffff"), "\u{1b}[38;2;255;255;255m");
//! let styled = format!("{}#12{}", Theme::bold(), Theme::reset());
//! assert!(styled.ends_with("\u{1b}[0m"));
//! ```

use crate::domain::{Result, UserdeckError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MOCHA: &str = "catppuccin-mocha";
const LATTE: &str = "catppuccin-latte";

/// Shown when a color does not parse.
const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for each part of the frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer hints, column titles, field labels.
    pub text_dim: String,
    pub border: String,

    pub search_bar_border: String,
    /// Search box border while typing.
    pub search_bar_focus: String,

    /// The single row shown while a search is active.
    pub searched_fg: String,
    pub searched_bg: String,

    /// "Loading users...", "No users found" and similar.
    pub placeholder_fg: String,
    /// Pager and loading indicator.
    pub badge_fg: String,

    pub toast_fg: String,
    pub toast_bg: String,
}

impl Theme {
    /// Built-in palette by name.
    ///
    /// ```rust
    /// use userdeck::ui::theme::Theme;
    ///
    /// assert!(Theme::from_name("catppuccin-latte").is_some());
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            MOCHA => include_str!("../../themes/catppuccin-mocha.toml"),
            LATTE => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Reads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// [`UserdeckError::Theme`] when the file is unreadable or misses a
    /// required color.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            UserdeckError::Theme(format!("Failed to read theme file {}: {e}", path.display()))
        })?;
        toml::from_str(&source)
            .map_err(|e| UserdeckError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// 24-bit foreground escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        escape(38, hex)
    }

    /// 24-bit background escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        escape(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{1b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{1b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{1b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Only if the bundled palette is malformed, which the tests rule out.
    fn default() -> Self {
        Self::from_name(MOCHA).expect("bundled catppuccin-mocha palette parses")
    }
}

fn escape(layer: u8, hex: &str) -> String {
    let (r, g, b) = parse_rgb(hex).unwrap_or(FALLBACK_RGB);
    format!("\u{1b}[{layer};2;{r};{g};{b}m")
}

/// `#rrggbb`, with or without the `#`.
fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let packed = u32::from_str_radix(digits, 16).ok()?;
    let [_, r, g, b] = packed.to_be_bytes();
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case(MOCHA)]
    #[case(LATTE)]
    fn bundled_palettes_parse(#[case] name: &str) {
        let theme = Theme::from_name(name).unwrap();
        assert_eq!(theme.name, name);
        assert!(theme.colors.header_bg.is_none());
    }

    #[test]
    fn palette_written_to_disk_loads_back() {
        let theme = Theme::from_name(LATTE).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&theme).unwrap().as_bytes()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn missing_color_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"half\"\n[colors]\nheader_fg = \"#000000\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, UserdeckError::Theme(ref msg) if msg.starts_with("Failed to parse")));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = Theme::from_file("/nonexistent/palette.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/palette.toml"));
    }

    #[rstest]
    #[case("1e1e2e", Some((30, 30, 46)))]
    #[case(" #F38BA8 ", Some((243, 139, 168)))]
    #[case("#12", None)]
    #[case("#12345g", None)]
    #[case("#+12345", None)]
    fn hex_parsing(#[case] hex: &str, #[case] expected: Option<(u8, u8, u8)>) {
        assert_eq!(parse_rgb(hex), expected);
    }

    #[test]
    fn bad_color_renders_white() {
        assert_eq!(Theme::bg("#12"), "\u{1b}[48;2;255;255;255m");
    }
}
