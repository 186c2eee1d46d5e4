//! Notification renderer.

use crate::ui::helpers::{position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Renders the notification centered on `row` with its dismiss label.
///
/// ```text
///          [ Server error: 500   Close [x] ]
/// ```
///
/// The message is shortened first when the pane is too narrow.
pub fn render_toast(out: &mut String, row: usize, toast: &ToastInfo, theme: &Theme, cols: usize) {
    let dismiss_len = visual_len(&toast.dismiss);
    let room = cols.saturating_sub(dismiss_len + 5);
    let message = truncate(&toast.message, room);
    let width = visual_len(&message) + dismiss_len + 5;
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(out, row, padding + 1);
    out.push_str(&Theme::fg(&theme.colors.toast_fg));
    out.push_str(&Theme::bg(&theme.colors.toast_bg));
    out.push(' ');
    out.push_str(&message);
    out.push_str("   ");
    out.push_str(Theme::bold());
    out.push_str(&toast.dismiss);
    out.push(' ');
    out.push_str(Theme::reset());
}
