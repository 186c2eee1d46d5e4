//! Canonical request identity.
//!
//! A [`RequestKey`] names what a request asks for, independent of URL or
//! headers. It keys the response cache, the in-flight set and the waiter
//! table, and its textual form travels through the host as the request
//! correlation token.

use crate::domain::UserId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identity of a remote user API request.
///
/// # Examples
///
/// ```
/// use userdeck::gateway::RequestKey;
/// use userdeck::UserId;
///
/// let key = RequestKey::User(UserId::new(7).unwrap());
/// assert_eq!(key.to_string(), "user:7");
/// assert_eq!("page:2".parse::<RequestKey>().unwrap(), RequestKey::Page(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    /// One page of the listing, 1-based.
    Page(u32),
    /// A single user record.
    User(UserId),
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "page:{page}"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// Reasons a string is not a valid [`RequestKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestKeyParseError {
    /// No `kind:value` separator.
    #[error("request key must look like `kind:value`, got `{0}`")]
    Malformed(String),
    /// Kind other than `page` or `user`.
    #[error("unknown request kind `{0}`")]
    UnknownKind(String),
    /// Value is not a positive integer.
    #[error("request key value must be a positive integer, got `{0}`")]
    InvalidValue(String),
}

impl FromStr for RequestKey {
    type Err = RequestKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| RequestKeyParseError::Malformed(s.to_string()))?;
        let invalid = || RequestKeyParseError::InvalidValue(value.to_string());

        match kind {
            "page" => value
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .map(Self::Page)
                .ok_or_else(invalid),
            "user" => value
                .parse::<u64>()
                .ok()
                .and_then(UserId::new)
                .map(Self::User)
                .ok_or_else(invalid),
            other => Err(RequestKeyParseError::UnknownKind(other.to_string())),
        }
    }
}
