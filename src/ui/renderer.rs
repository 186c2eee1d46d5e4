//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the view model from `AppState`, then hand
//! it to the components. The frame is built in memory and printed at once.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::AppState;
//! use userdeck::gateway::ApiEndpoint;
//! use userdeck::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(Theme::default(), ApiEndpoint::default());
//! let frame = render_to_string(&state, 24, 80);
//! assert!(frame.contains("Waiting for permission"));
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; the host does that between frames.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders one frame as an ANSI string.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut out = String::new();
    components::render_frame(&mut out, &viewmodel, &state.theme, cols, rows);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Action, Event};
    use crate::gateway::{ApiEndpoint, HttpResponse};
    use crate::ui::Theme;

    const PAGE_1: &str = r#"{"page":1,"per_page":6,"total":12,"total_pages":2,"data":[
        {"id":1,"email":"george.bluth@reqres.in","first_name":"George","last_name":"Bluth","avatar":""}]}"#;

    fn started() -> AppState {
        let mut state = AppState::new(Theme::default(), ApiEndpoint::default());
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        for action in actions {
            if let Action::WebRequest(request) = action {
                let response = HttpResponse::answering(&request, 200, PAGE_1);
                handle_event(&mut state, &Event::WebResponse(response)).unwrap();
            }
        }
        state
    }

    #[test]
    fn list_frame_shows_rows_and_pager() {
        let frame = render_to_string(&started(), 24, 100);
        assert!(frame.contains("George Bluth"));
        assert!(frame.contains("george.bluth@reqres.in"));
        assert!(frame.contains("Page 1 of 2"));
        assert!(frame.contains("12 users"));
        assert!(!frame.contains("loading..."));
    }

    #[test]
    fn loading_indicator_shows_while_requests_are_out() {
        let mut state = AppState::new(Theme::default(), ApiEndpoint::default());
        handle_event(&mut state, &Event::Start).unwrap();
        let frame = render_to_string(&state, 24, 100);
        assert!(frame.contains("loading..."));
        assert!(frame.contains("Loading users..."));
    }

    #[test]
    fn notification_has_dismiss_label() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        let Some(Action::WebRequest(request)) = actions.into_iter().next() else {
            panic!("expected a page request");
        };
        handle_event(&mut state, &Event::WebResponse(HttpResponse::answering(&request, 500, ""))).unwrap();

        let frame = render_to_string(&state, 24, 100);
        assert!(frame.contains("Failed to load users: Server error: 500"));
        assert!(frame.contains("Close [x]"));
    }

    #[test]
    fn tiny_pane_does_not_panic() {
        let state = started();
        let _ = render_to_string(&state, 2, 4);
        let _ = render_to_string(&state, 0, 0);
    }
}
