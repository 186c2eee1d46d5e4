//! User directory domain model.
//!
//! The remote API owns these records; the plugin only enforces that user ids
//! are positive and otherwise passes display fields through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;

/// Positive integer identifying a user, assigned by the remote API.
///
/// # Examples
///
/// ```
/// use userdeck::UserId;
///
/// assert!(UserId::new(0).is_none());
/// assert_eq!(UserId::new(7).map(UserId::get), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for UserId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "user id must be a positive integer".to_string())
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.get()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record as served by the directory API.
///
/// Fields the plugin does not render are kept in `extra` so the record can be
/// handed on exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl User {
    /// First and last name joined by a space, or the email when both are empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// One page of the user listing, exactly as the API reports it.
///
/// The paging fields are trusted as-is; when `data` is non-empty the API
/// guarantees `page` lies within `1..=total_pages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    pub data: Vec<User>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// Envelope the single-user endpoint wraps its record in.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserEnvelope {
    pub data: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_keeps_unknown_fields() {
        let json = r#"{
            "id": 2,
            "email": "janet.weaver@reqres.in",
            "first_name": "Janet",
            "last_name": "Weaver",
            "avatar": "https://reqres.in/img/faces/2-image.jpg",
            "department": "finance"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.get(), 2);
        assert_eq!(user.display_name(), "Janet Weaver");
        assert_eq!(user.extra.get("department"), Some(&Value::from("finance")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["department"], "finance");
        assert_eq!(back["id"], 2);
    }

    #[test]
    fn user_with_zero_id_is_rejected() {
        let err = serde_json::from_str::<User>(r#"{"id": 0, "email": "x@y.z"}"#).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn page_decodes_listing_shape() {
        let json = r#"{
            "page": 2,
            "per_page": 6,
            "total": 12,
            "total_pages": 2,
            "data": [{"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael", "last_name": "Lawson", "avatar": ""}],
            "support": {"url": "https://reqres.in"}
        }"#;

        let page: UserPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0].id.get(), 7);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(r#"{"id": 3, "email": "emma@reqres.in"}"#).unwrap();
        assert_eq!(user.display_name(), "emma@reqres.in");
    }
}
