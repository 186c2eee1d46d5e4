//! Terminal rendering.
//!
//! ```text
//! AppState ─► compute_viewmodel ─► UIViewModel ─► render_frame ─► ANSI frame
//! ```
//!
//! - [`viewmodel`]: plain data describing one frame
//! - [`renderer`]: entry points called from the plugin's `render`
//! - [`components`]: one renderer per frame region
//! - [`helpers`]: cursor moves, truncation and centering
//! - [`theme`]: palettes and escape codes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    Body, DetailCard, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PagerInfo, SearchBarInfo,
    ToastInfo, UIViewModel,
};
