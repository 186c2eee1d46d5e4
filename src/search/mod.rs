//! Search mode shared between the header search box and the user list.
//!
//! The header publishes transitions once a searched id is confirmed to
//! exist; the list subscribes and switches between browsing and showing the
//! single searched record. Neither side knows about the other.

pub mod coordinator;

pub use coordinator::{SearchModeCoordinator, SearchModeState, Subscription};
