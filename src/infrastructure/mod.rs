//! Sandbox environment helpers.
//!
//! The plugin runs in Zellij's WASI sandbox, where the host filesystem is
//! mounted under `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
