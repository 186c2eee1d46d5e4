//! User detail card renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailCard;

const LABEL_WIDTH: usize = 14;

/// Renders the user's name followed by one `label  value` line per field.
///
/// Fields that do not fit above `last_row` are left out.
pub fn render_detail(out: &mut String, row: usize, last_row: usize, card: &DetailCard, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 3);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&truncate(&card.title, cols.saturating_sub(4)));
    out.push_str(Theme::reset());

    let mut current_row = row + 2;
    let value_width = cols.saturating_sub(LABEL_WIDTH + 4);
    for (label, value) in &card.fields {
        if current_row > last_row {
            break;
        }
        position_cursor(out, current_row, 3);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!("{:<width$}", truncate(label, LABEL_WIDTH - 1), width = LABEL_WIDTH));
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&truncate(value, value_width));
        out.push_str(Theme::reset());
        current_row += 1;
    }
    current_row
}
