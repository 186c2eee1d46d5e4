//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; deciding
//! what to show happens before, drawing it happens after.
//!
//! # Example
//!
//! ```rust
//! use userdeck::ui::viewmodel::{Body, DisplayItem, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Users (12) ".to_string() },
//!     search_bar: SearchBarInfo { query: "7".to_string(), focused: true },
//!     body: Body::Table {
//!         rows: vec![DisplayItem {
//!             id: "7".to_string(),
//!             name: "Michael Lawson".to_string(),
//!             email: "michael.lawson@reqres.in".to_string(),
//!             is_selected: true,
//!             is_match: true,
//!         }],
//!         pager: None,
//!     },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     toast: None,
//!     loading: false,
//! };
//! assert!(matches!(vm.body, Body::Table { .. }));
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// The header search box; present on every screen.
    pub search_bar: SearchBarInfo,

    /// What fills the space between the search box and the footer.
    pub body: Body,

    pub footer: FooterInfo,

    /// Notification shown centered on the top row.
    pub toast: Option<ToastInfo>,

    /// Whether any request is still on the wire.
    pub loading: bool,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// User rows, already windowed to fit the terminal.
    Table {
        rows: Vec<DisplayItem>,
        /// Paging line; absent in search mode.
        pager: Option<PagerInfo>,
    },
    /// One user record.
    Detail(DetailCard),
    /// Nothing to list: loading, empty page, failed search, or not started.
    Empty(EmptyState),
}

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_selected: bool,
    /// The row is the searched record.
    pub is_match: bool,
}

/// Position within the paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Field list of a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: String,
    /// `(label, value)` pairs in display order.
    pub fields: Vec<(String, String)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No users found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Printable keys currently go into the box.
    pub focused: bool,
}

/// A notification and its dismiss affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub message: String,
    /// Label of the dismiss action, e.g. `Close [x]`.
    pub dismiss: String,
}
