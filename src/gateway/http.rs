//! Host-neutral HTTP request and response shapes.
//!
//! The plugin never performs I/O itself. The gateway describes requests as
//! [`HttpRequest`] values, the host sends them, and answers come back as
//! [`HttpResponse`] values carrying the same context map.

use crate::domain::{Result, UserId, UserdeckError};
use std::collections::BTreeMap;
use url::Url;

/// Context entry holding the textual [`RequestKey`](super::RequestKey).
pub const REQUEST_KEY_CONTEXT: &str = "request_key";

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Default listing endpoint.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/users";

/// Default API key for the public endpoint.
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// An outbound GET request for the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Opaque values the host echoes back with the response.
    pub context: BTreeMap<String, String>,
}

/// A completed request as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status; `0` when the request failed before reaching the server.
    ///
    /// Zellij reports such failures as status 400 with no headers and the
    /// error text as body; [`HttpResponse::from_host`] maps that shape to `0`.
    pub status: u16,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

/// Status Zellij uses for requests that never got an answer.
const HOST_FAILURE_STATUS: u16 = 400;

impl HttpResponse {
    /// Converts a host `WebRequestResult`.
    ///
    /// A 400 without response headers and with a body that is not JSON
    /// cannot come from a server, so it is treated as a transport failure.
    #[must_use]
    pub fn from_host(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    ) -> Self {
        let failed_locally = status == HOST_FAILURE_STATUS
            && headers.is_empty()
            && serde_json::from_slice::<serde_json::Value>(&body).is_err();
        if failed_locally {
            tracing::debug!(body = %String::from_utf8_lossy(&body), "host reported a failed request");
        }
        Self {
            status: if failed_locally { 0 } else { status },
            body,
            context,
        }
    }

    /// Builds the response the host would deliver for `request`.
    #[must_use]
    pub fn answering(request: &HttpRequest, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            context: request.context.clone(),
        }
    }

    /// Builds a transport failure for `request` with the host's error text.
    #[must_use]
    pub fn transport_failure(request: &HttpRequest, message: &str) -> Self {
        Self::answering(request, 0, message.as_bytes().to_vec())
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Where the user directory lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
    api_key: String,
}

impl ApiEndpoint {
    /// Validates `base_url` as an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`UserdeckError::Config`] when the URL does not parse, is not
    /// http(s), or already carries a query string.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| UserdeckError::Config(format!("invalid api_base_url `{base_url}`: {e}")))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(UserdeckError::Config(format!(
                "api_base_url must be http or https, got `{}`",
                base.scheme()
            )));
        }
        if base.query().is_some() {
            return Err(UserdeckError::Config(
                "api_base_url must not carry a query string".to_string(),
            ));
        }

        Ok(Self {
            base,
            api_key: api_key.into(),
        })
    }

    /// `<base>?page=<page>`.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url.to_string()
    }

    /// `<base>/<id>`.
    #[must_use]
    pub fn user_url(&self, id: UserId) -> String {
        format!("{}/{id}", self.base.as_str().trim_end_matches('/'))
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(API_KEY_HEADER.to_string(), self.api_key.clone())])
    }
}

impl Default for ApiEndpoint {
    /// # Panics
    ///
    /// Panics if the built-in base URL fails to parse (should never occur).
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("Built-in API base URL should always parse"),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}
