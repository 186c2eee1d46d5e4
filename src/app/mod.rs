//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the domain,
//! gateway and search layers:
//!
//! ```text
//! Keys / Timers / Web results → Events → Event Handler → State Mutations → Actions
//!                                              ↑                              ↓
//!                                              └────── host callbacks ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`state`]: Central state container and view model computation
//! - [`header`]: Debounced search box publishing confirmed ids
//! - [`list`] and [`detail`]: The two screens
//! - [`loader`], [`timers`], [`notifications`], [`context`]: Services the
//!   screens share
//! - [`routes`]: Path parsing
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{handle_event, AppState, Event};
//! use userdeck::gateway::ApiEndpoint;
//! use userdeck::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), ApiEndpoint::default());
//! let (_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), userdeck::UserdeckError>(())
//! ```

pub mod actions;
pub mod context;
pub mod detail;
pub mod handler;
pub mod header;
pub mod list;
pub mod loader;
pub mod modes;
pub mod notifications;
pub mod routes;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use routes::Route;
pub use state::{AppState, Screen};
pub use timers::{Clock, ManualClock, SystemClock};
