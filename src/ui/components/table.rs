//! Table component renderer.
//!
//! Renders the user list as three columns (ID, NAME, EMAIL) followed by the
//! pager line. The selected row gets the selection colors; the searched
//! record gets the match colors unless selected.

use crate::ui::helpers::{position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, PagerInfo};

const ID_COLUMN_WIDTH: usize = 8;
const NAME_COLUMN_WIDTH: usize = 28;

/// Renders the column headers. Returns the next available row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!(
        "{:<id$}{:<name$}{}",
        "ID",
        "NAME",
        "EMAIL",
        id = ID_COLUMN_WIDTH,
        name = NAME_COLUMN_WIDTH
    ));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders every row, one per line. Returns the row after the last one.
pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row padded to the full width so the background is even.
///
/// # Styling Precedence
///
/// 1. Selection colors (if `is_selected`)
/// 2. Match colors (if `is_match`)
/// 3. Normal text color
fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    if item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else if item.is_match {
        out.push_str(&Theme::fg(&theme.colors.searched_fg));
        out.push_str(&Theme::bg(&theme.colors.searched_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    let line = format!(
        "{:<id$}{:<name$}{}",
        item.id,
        item.name,
        item.email,
        id = ID_COLUMN_WIDTH,
        name = NAME_COLUMN_WIDTH
    );
    out.push_str(&line);
    out.push_str(&" ".repeat(cols.saturating_sub(visual_len(&line))));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders `‹ Page 1 of 2 ›  12 users`, dimming arrows that lead nowhere.
pub fn render_pager(out: &mut String, row: usize, pager: &PagerInfo, theme: &Theme) -> usize {
    let arrow = |enabled: bool, glyph: &str| {
        let color = if enabled { &theme.colors.badge_fg } else { &theme.colors.text_dim };
        format!("{}{glyph}{}", Theme::fg(color), Theme::reset())
    };

    position_cursor(out, row, 1);
    out.push_str(&arrow(pager.has_previous, "‹ h"));
    out.push_str(&Theme::fg(&theme.colors.badge_fg));
    out.push_str(&format!("  Page {} of {}  ", pager.page, pager.total_pages));
    out.push_str(Theme::reset());
    out.push_str(&arrow(pager.has_next, "l ›"));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!("   {} users", pager.total));
    out.push_str(Theme::reset());
    row + 1
}
