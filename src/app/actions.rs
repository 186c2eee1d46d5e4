//! Side effects requested by the event handler.
//!
//! The handler never calls the host. It returns a `Vec<Action>` after every
//! event and the plugin shim performs them in order.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::Action;
//!
//! let actions = vec![Action::SetTimeout { seconds: 0.4 }, Action::CloseFocus];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::gateway::HttpRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a GET request; the host answers with a web request result
    /// carrying the request's context map.
    WebRequest(HttpRequest),

    /// Asks the host for a timer event after `seconds`.
    ///
    /// The timer carries no payload; what is due is decided when it fires.
    SetTimeout {
        seconds: f64,
    },
}
