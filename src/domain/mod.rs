//! Domain layer for the Userdeck plugin.
//!
//! Core types independent of Zellij APIs and of how requests travel:
//!
//! - [`error`]: remote fetch errors and the crate error type
//! - [`user`]: users, user ids and listing pages
//!
//! # Examples
//!
//! ```
//! use userdeck::domain::{FetchError, UserId};
//!
//! let id = UserId::new(12).ok_or(FetchError::NotFound)?;
//! assert_eq!(id.to_string(), "12");
//! # Ok::<(), FetchError>(())
//! ```

pub mod error;
pub mod user;

pub use error::{FetchError, Result, UserdeckError};
pub use user::{User, UserId, UserPage};
