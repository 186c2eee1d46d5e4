//! Error types for the Userdeck plugin.
//!
//! Two families live here:
//!
//! - [`FetchError`]: what the remote user API can do to a request. These are
//!   user-facing; their `Display` text is exactly what notifications show.
//! - [`UserdeckError`]: everything else that can go wrong inside the plugin
//!   (configuration, themes, host plumbing). These are logged, never shown.
//!
//! Both are implemented with `thiserror`.

use thiserror::Error;

/// Normalized failure of a remote user API call.
///
/// Every transport or HTTP failure is folded into one of three shapes so that
/// callers only decide between "show a notification" and "ignore", never
/// between status codes.
///
/// # Examples
///
/// ```
/// use userdeck::FetchError;
///
/// assert_eq!(FetchError::NotFound.to_string(), "User not found");
/// assert_eq!(FetchError::Server { status: 503 }.to_string(), "Server error: 503");
/// assert_eq!(
///     FetchError::Transport("connection refused".to_string()).to_string(),
///     "connection refused"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API answered 404 for the requested resource.
    #[error("User not found")]
    NotFound,

    /// The API answered with any other non-2xx status.
    #[error("Server error: {status}")]
    Server {
        /// HTTP status code returned by the API.
        status: u16,
    },

    /// The request never produced a usable HTTP answer.
    ///
    /// Covers network failures reported by the host and 2xx bodies that do
    /// not decode. The message is passed through unchanged.
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// Maps a non-2xx HTTP status onto the error taxonomy.
    ///
    /// Status `0` is how the host reports a request that never reached the
    /// server; the response body then carries the host's error text.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match status {
            0 => {
                let message = String::from_utf8_lossy(body).trim().to_string();
                if message.is_empty() {
                    Self::Transport("Network request failed".to_string())
                } else {
                    Self::Transport(message)
                }
            }
            404 => Self::NotFound,
            status => Self::Server { status },
        }
    }
}

/// The main error type for Userdeck plugin operations.
///
/// Covers failures that are not remote API outcomes: bad configuration,
/// unreadable themes, and host events that cannot be correlated with
/// anything the plugin asked for.
#[derive(Debug, Error)]
pub enum UserdeckError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A web request result arrived that no request of ours produced.
    ///
    /// Raised when the response context carries no request key, or one that
    /// does not parse.
    #[error("Unrecognized web response: {0}")]
    UnknownResponse(String),
}

/// A specialized `Result` type for Userdeck operations.
pub type Result<T> = std::result::Result<T, UserdeckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(404, FetchError::NotFound)]
    #[case(500, FetchError::Server { status: 500 })]
    #[case(401, FetchError::Server { status: 401 })]
    fn status_codes_map_onto_taxonomy(#[case] status: u16, #[case] expected: FetchError) {
        assert_eq!(FetchError::from_status(status, b""), expected);
    }

    #[test]
    fn transport_failure_passes_host_message_through() {
        let err = FetchError::from_status(0, b"dns error: no such host\n");
        assert_eq!(err.to_string(), "dns error: no such host");
    }

    #[test]
    fn transport_failure_without_message_gets_generic_text() {
        let err = FetchError::from_status(0, b"  ");
        assert_eq!(err.to_string(), "Network request failed");
    }
}
