//! Search box component renderer.

use crate::ui::helpers::{position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line bordered search box, highlighted while focused.
///
/// # Layout
///
/// ```text
/// [margin] ┌────────────────┐ [margin]
/// [margin] │ User id: 7_    │ [margin]
/// [margin] └────────────────┘ [margin]
/// ```
///
/// Returns the row after the box.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let cursor = if search.focused { "_" } else { "" };
    let text = truncate(&format!(" User id: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(visual_len(&text));

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(&Theme::fg(if search.query.is_empty() && !search.focused {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    }));
    out.push_str(&text);
    out.push_str(&" ".repeat(padding));
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
