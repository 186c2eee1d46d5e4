//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, timers, web responses)
//! 2. [`handle_event`] reads the clock and pattern-matches the event
//! 3. State mutations occur via `AppState` methods
//! 4. Requests and timeouts produced along the way are returned as actions
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{handle_event, Action, AppState, Event};
//! use userdeck::gateway::ApiEndpoint;
//! use userdeck::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), ApiEndpoint::default());
//! let (render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::WebRequest(_)]));
//! # Ok::<(), userdeck::UserdeckError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::gateway::HttpResponse;
use crate::observability::TraceContext;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; enter the start route.
    Start,
    /// Go to a path such as `/` or `/user/7`.
    Navigate(String),

    /// Moves selection cursor down by one row (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one row (wraps to bottom).
    KeyUp,
    /// Next listing page (browse mode only).
    NextPage,
    /// Previous listing page (browse mode only).
    PrevPage,
    /// Opens the highlighted user.
    Open,
    /// Detail view back to the list.
    Back,

    /// Printable keys now go into the search box.
    FocusSearch,
    /// Printable keys drive navigation again; the search itself stays.
    LeaveSearch,
    /// Appends a character to the search box.
    Char(char),
    /// Removes the last character from the search box.
    Backspace,
    /// Looks up the typed id without waiting for the debounce.
    SubmitSearch,
    /// Empties the search box and returns the list to browsing.
    ClearSearch,

    /// Closes the notification.
    DismissNotification,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// A host timeout fired.
    TimerElapsed,
    /// The host finished a web request.
    WebResponse(HttpResponse),
}

/// Processes an event, mutates application state, and returns whether to
/// re-render plus the actions to execute.
///
/// # Errors
///
/// Returns [`UserdeckError::UnknownResponse`](crate::UserdeckError::UnknownResponse)
/// for web responses that no request of ours produced.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();
    state.tick();

    let render = match event {
        Event::Start => state.start(),
        Event::Navigate(path) => {
            state.navigate(path);
            true
        }
        Event::KeyDown => state.move_selection_down(),
        Event::KeyUp => state.move_selection_up(),
        Event::NextPage => state.next_page(),
        Event::PrevPage => state.previous_page(),
        Event::Open => state.open_selected(),
        Event::Back => state.back(),
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            true
        }
        Event::LeaveSearch => {
            state.input_mode = InputMode::Normal;
            true
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let (search, ctx) = state.search_and_context();
            search.push(*c, ctx);
            tracing::trace!(query = %state.search_input().raw(), "search input updated");
            true
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let (search, ctx) = state.search_and_context();
            search.backspace(ctx);
            true
        }
        Event::SubmitSearch => {
            let (search, ctx) = state.search_and_context();
            let submitted = search.submit(ctx);
            state.settle();
            submitted
        }
        Event::ClearSearch => {
            tracing::debug!("clearing search");
            let (search, ctx) = state.search_and_context();
            search.clear(ctx);
            state.settle();
            true
        }
        Event::DismissNotification => state.context_mut().notifications.dismiss(),
        Event::CloseFocus => return Ok((false, vec![Action::CloseFocus])),
        Event::TimerElapsed => state.fire_due_timers(),
        Event::WebResponse(response) => {
            let span = tracing::debug_span!(
                "web_response",
                status = response.status,
                trace_id = tracing::field::Empty,
                parent_span_id = tracing::field::Empty,
            );
            if let Some(trace) = TraceContext::extract(&response.context) {
                trace.record_on(&span);
            }
            let _guard = span.entered();

            state.context_mut().loader.complete(response)?;
            state.settle();
            true
        }
    };

    let actions = state.take_actions();
    tracing::debug!(render, action_count = actions.len(), "event handled");
    Ok((render, actions))
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "Start",
        Event::Navigate(_) => "Navigate",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::Open => "Open",
        Event::Back => "Back",
        Event::FocusSearch => "FocusSearch",
        Event::LeaveSearch => "LeaveSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitSearch => "SubmitSearch",
        Event::ClearSearch => "ClearSearch",
        Event::DismissNotification => "DismissNotification",
        Event::CloseFocus => "CloseFocus",
        Event::TimerElapsed => "TimerElapsed",
        Event::WebResponse(_) => "WebResponse",
    }
}
