//! Shared rendering utilities.
//!
//! Components write ANSI output into a `String` frame instead of stdout, so
//! a whole frame can be inspected in tests and printed in one go.

use std::fmt::Write as _;

/// Appends the escape moving the cursor to `row`, `col` (both 1-indexed).
///
/// # Example
///
/// ```rust
/// use userdeck::ui::helpers::position_cursor;
///
/// let mut out = String::new();
/// position_cursor(&mut out, 5, 1);
/// assert_eq!(out, "\u{1b}[5;1H");
/// ```
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies, counting one per `char`.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Makes text from outside the plugin safe to place in a frame.
///
/// Line breaks and tabs become spaces; every other control character,
/// including the ESC that starts an escape sequence, is dropped.
///
/// # Example
///
/// ```rust
/// use userdeck::ui::helpers::sanitize;
///
/// assert_eq!(sanitize("Eve\u{1b}[2J\nHolt"), "Eve[2J Holt");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Cuts `text` to at most `width` chars, ending in `...` when shortened.
///
/// # Example
///
/// ```rust
/// use userdeck::ui::helpers::truncate;
///
/// assert_eq!(truncate("janet.weaver@reqres.in", 10), "janet.w...");
/// assert_eq!(truncate("Janet", 10), "Janet");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if visual_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Appends `text` centered in `cols` cells, padded on both sides so the line
/// is fully painted with the current colors.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = visual_len(&text);
    let padding = cols.saturating_sub(len) / 2;
    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}
