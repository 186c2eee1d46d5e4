//! Keyboard focus.
//!
//! - **Normal**: keys drive the list or the detail view
//! - **Typing**: printable keys go into the header search box
//!
//! Search *mode* (browsing vs. showing one searched record) is a separate
//! concept owned by [`SearchModeCoordinator`](crate::search::SearchModeCoordinator);
//! leaving the search box does not clear it.

/// Which component receives printable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation keys: j/k, h/l, Enter, `/`, `c`, q.
    #[default]
    Normal,

    /// Printable keys edit the search box; Enter submits, Esc clears or
    /// leaves it.
    Typing,
}
