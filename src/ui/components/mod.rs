//! Composable UI component renderers.
//!
//! # Components
//!
//! - `header`: Title bar
//! - `search`: Search box, always visible
//! - `table`: User rows with the pager line
//! - `detail`: Single user card
//! - `empty`: Centered message when there is nothing to list
//! - `toast`: Notification on the top row
//! - `footer`: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [Toast or blank line]
//! [Header]
//! [Border]                      loading...
//! [Search Box - 3 lines]
//! [Table Headers + Rows + Pager | Detail card | Empty state]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_pager, render_table_headers, render_table_rows};
use toast::render_toast;

const LOADING_LABEL: &str = " loading... ";

/// Renders a horizontal border line. Returns the next available row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders one complete frame of `rows` x `cols` into `out`.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    let border_row = current_row;
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    if vm.loading && cols > LOADING_LABEL.len() {
        position_cursor(out, border_row, cols - LOADING_LABEL.len());
        out.push_str(&Theme::fg(&theme.colors.badge_fg));
        out.push_str(LOADING_LABEL);
        out.push_str(Theme::reset());
    }
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let bottom_border = footer_start.saturating_sub(1);

    match &vm.body {
        Body::Table { rows: items, pager } => {
            current_row = render_table_headers(out, current_row, theme);
            current_row = render_table_rows(out, current_row, items, theme, cols);
            if let Some(pager) = pager {
                render_pager(out, current_row, pager, theme);
            }
        }
        Body::Detail(card) => {
            render_detail(out, current_row, bottom_border.saturating_sub(1), card, theme, cols);
        }
        Body::Empty(empty) => {
            render_empty_state(out, current_row, empty, theme, cols);
        }
    }

    render_border(out, bottom_border, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);

    if let Some(toast) = &vm.toast {
        render_toast(out, 1, toast, theme, cols);
    }
}
