//! Navigable paths.
//!
//! Two routes exist: `/` for the list and `/user/<id>` for one record.
//! Anything else falls back to the list.

use crate::domain::UserId;
use std::fmt;

/// Path of the user list.
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Users,
    /// The id segment exactly as it appeared in the path; validated on entry
    /// by the detail view.
    UserDetail(String),
}

impl Route {
    /// Parses a path such as `/user/7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use userdeck::app::routes::Route;
    ///
    /// assert_eq!(Route::parse("/user/7"), Route::UserDetail("7".to_string()));
    /// assert_eq!(Route::parse("/settings"), Route::Users);
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed.strip_prefix("/user") {
            Some("") => Self::UserDetail(String::new()),
            Some(rest) => rest
                .strip_prefix('/')
                .filter(|segment| !segment.contains('/'))
                .map_or(Self::Users, |segment| Self::UserDetail(segment.to_string())),
            None => Self::Users,
        }
    }

    /// Path leading to a given user's detail.
    #[must_use]
    pub fn user(id: UserId) -> Self {
        Self::UserDetail(id.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => f.write_str(ROOT_PATH),
            Self::UserDetail(raw) => write!(f, "/user/{raw}"),
        }
    }
}

/// Interprets a route segment as a user id: surrounding whitespace is ignored,
/// anything other than a positive decimal integer is rejected.
#[must_use]
pub fn resolve_user_id(raw: &str) -> Option<UserId> {
    raw.trim().parse::<u64>().ok().and_then(UserId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Users)]
    #[case("", Route::Users)]
    #[case("/user/12", Route::UserDetail("12".into()))]
    #[case("/user/12/", Route::UserDetail("12".into()))]
    #[case("/user/abc", Route::UserDetail("abc".into()))]
    #[case("/user", Route::UserDetail(String::new()))]
    #[case("/user/1/edit", Route::Users)]
    #[case("/users", Route::Users)]
    fn paths_map_onto_routes(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path), expected);
    }

    #[rstest]
    #[case("7", Some(7))]
    #[case(" 7 ", Some(7))]
    #[case("0", None)]
    #[case("abc", None)]
    #[case("-3", None)]
    #[case("", None)]
    fn route_ids_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<u64>) {
        assert_eq!(resolve_user_id(raw).map(UserId::get), expected);
    }

    #[test]
    fn display_round_trips_detail_paths() {
        let route = Route::user(UserId::new(3).unwrap());
        assert_eq!(route.to_string(), "/user/3");
        assert_eq!(Route::parse(&route.to_string()), route);
    }
}
