//! Remote user directory gateway.
//!
//! [`UserGateway`] is the only component that knows the remote API exists. It
//! turns "give me page 3" or "give me user 7" into one of three answers:
//!
//! - [`Fetch::Ready`]: the cache already holds the value, no network needed
//! - [`Fetch::Requested`]: a new [`HttpRequest`] the host must send
//! - [`Fetch::Joined`]: an identical request is already on the wire
//!
//! When the host reports back, [`UserGateway::complete`] correlates the
//! response by its [`RequestKey`], normalizes failures into
//! [`FetchError`](crate::FetchError), and caches successes.
//!
//! # Staleness
//!
//! With the default [`UnboundedCache`] nothing is ever refetched once it has
//! succeeded. That holds only while the directory is read-only for the
//! session.
//!
//! # Modules
//!
//! - [`cache`]: cache port and the unbounded adapter
//! - [`http`]: request/response shapes and endpoint configuration
//! - [`key`]: canonical request identity

pub mod cache;
pub mod http;
pub mod key;

pub use cache::{Payload, ResponseCache, UnboundedCache};
pub use http::{
    ApiEndpoint, HttpRequest, HttpResponse, API_KEY_HEADER, DEFAULT_API_KEY, DEFAULT_BASE_URL,
    REQUEST_KEY_CONTEXT,
};
pub use key::RequestKey;

use crate::domain::user::UserEnvelope;
use crate::domain::{FetchError, Result, User, UserId, UserPage, UserdeckError};
use crate::observability::TraceContext;
use std::collections::{BTreeMap, HashSet};

/// Outcome of asking the gateway for a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    /// Served from cache.
    Ready(T),
    /// A new request the host must send.
    Requested(HttpRequest),
    /// Same key already in flight; its completion answers this call too.
    Joined,
}

/// A correlated response from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub key: RequestKey,
    pub outcome: std::result::Result<Payload, FetchError>,
}

/// Builds requests against the user API and memoizes what comes back.
#[derive(Debug)]
pub struct UserGateway<C = UnboundedCache> {
    endpoint: ApiEndpoint,
    cache: C,
    in_flight: HashSet<RequestKey>,
}

impl UserGateway<UnboundedCache> {
    /// Creates a gateway with the never-evicting cache.
    #[must_use]
    pub fn new(endpoint: ApiEndpoint) -> Self {
        Self::with_cache(endpoint, UnboundedCache::new())
    }
}

impl<C: ResponseCache> UserGateway<C> {
    /// Creates a gateway backed by a caller-chosen cache policy.
    pub fn with_cache(endpoint: ApiEndpoint, cache: C) -> Self {
        Self {
            endpoint,
            cache,
            in_flight: HashSet::new(),
        }
    }

    /// Requests one listing page.
    pub fn fetch_page(&mut self, page: u32) -> Fetch<UserPage> {
        let key = RequestKey::Page(page);
        match self.cache.get(&key) {
            Some(Payload::Page(cached)) => {
                tracing::debug!(%key, "page served from cache");
                Fetch::Ready(cached)
            }
            _ => self.request(key, self.endpoint.page_url(page)),
        }
    }

    /// Requests one user record.
    pub fn fetch_by_id(&mut self, id: UserId) -> Fetch<User> {
        let key = RequestKey::User(id);
        match self.cache.get(&key) {
            Some(Payload::User(cached)) => {
                tracing::debug!(%key, "user served from cache");
                Fetch::Ready(cached)
            }
            _ => self.request(key, self.endpoint.user_url(id)),
        }
    }

    fn request<T>(&mut self, key: RequestKey, url: String) -> Fetch<T> {
        if !self.in_flight.insert(key) {
            tracing::debug!(%key, "joining in-flight request");
            return Fetch::Joined;
        }

        let mut context = BTreeMap::from([(http::REQUEST_KEY_CONTEXT.to_string(), key.to_string())]);
        if let Some(trace) = TraceContext::from_current() {
            trace.inject(&mut context);
        }

        tracing::debug!(%key, url = %url, "issuing request");
        Fetch::Requested(HttpRequest {
            url,
            headers: self.endpoint.headers(),
            context,
        })
    }

    /// Correlates a host response with the request that produced it.
    ///
    /// Successful bodies are decoded, cached and returned; failures come back
    /// as [`FetchError`] inside `outcome`.
    ///
    /// # Errors
    ///
    /// Returns [`UserdeckError::UnknownResponse`] when the response context
    /// carries no parseable request key.
    pub fn complete(&mut self, response: &HttpResponse) -> Result<Completion> {
        let raw_key = response
            .context
            .get(http::REQUEST_KEY_CONTEXT)
            .ok_or_else(|| UserdeckError::UnknownResponse("missing request key".to_string()))?;
        let key: RequestKey = raw_key
            .parse()
            .map_err(|e| UserdeckError::UnknownResponse(format!("{e}")))?;

        self.in_flight.remove(&key);

        let outcome = if response.is_success() {
            Self::decode(key, &response.body)
        } else {
            Err(FetchError::from_status(response.status, &response.body))
        };

        match &outcome {
            Ok(payload) => {
                tracing::debug!(%key, status = response.status, "request succeeded, caching");
                self.cache.put(key, payload.clone());
            }
            Err(e) => {
                tracing::debug!(%key, status = response.status, error = %e, "request failed");
            }
        }

        Ok(Completion { key, outcome })
    }

    fn decode(key: RequestKey, body: &[u8]) -> std::result::Result<Payload, FetchError> {
        let invalid = |e: serde_json::Error| FetchError::Transport(format!("Invalid response body: {e}"));
        match key {
            RequestKey::Page(_) => serde_json::from_slice::<UserPage>(body)
                .map(Payload::Page)
                .map_err(invalid),
            RequestKey::User(_) => serde_json::from_slice::<UserEnvelope>(body)
                .map(|envelope| Payload::User(envelope.data))
                .map_err(invalid),
        }
    }

    /// Whether any request is awaiting its response.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Read access to the cache, mostly for diagnostics.
    pub const fn cache(&self) -> &C {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> UserGateway {
        UserGateway::new(ApiEndpoint::new("https://example.test/api/users", "secret").unwrap())
    }

    fn uid(n: u64) -> UserId {
        UserId::new(n).unwrap()
    }

    fn requested<T: std::fmt::Debug>(fetch: Fetch<T>) -> HttpRequest {
        match fetch {
            Fetch::Requested(request) => request,
            other => panic!("expected a network request, got {other:?}"),
        }
    }

    const JANET: &str = r#"{"data":{"id":2,"email":"janet.weaver@reqres.in","first_name":"Janet","last_name":"Weaver","avatar":""}}"#;

    #[test]
    fn second_fetch_by_id_is_served_from_cache() {
        let mut gateway = gateway();
        let request = requested(gateway.fetch_by_id(uid(2)));
        let completion = gateway
            .complete(&HttpResponse::answering(&request, 200, JANET))
            .unwrap();

        let Ok(Payload::User(first)) = completion.outcome else {
            panic!("expected a user payload");
        };
        match gateway.fetch_by_id(uid(2)) {
            Fetch::Ready(second) => assert_eq!(second, first),
            other => panic!("expected cache hit, got {other:?}"),
        }
        assert_eq!(gateway.cache().len(), 1);
    }

    #[test]
    fn requests_carry_api_key_and_correlation_key() {
        let mut gateway = gateway();
        let request = requested(gateway.fetch_page(2));

        assert_eq!(request.url, "https://example.test/api/users?page=2");
        assert_eq!(request.headers.get("x-api-key").map(String::as_str), Some("secret"));
        assert_eq!(
            request.context.get(http::REQUEST_KEY_CONTEXT).map(String::as_str),
            Some("page:2")
        );
    }

    #[test]
    fn identical_in_flight_request_is_joined() {
        let mut gateway = gateway();
        let _request = requested(gateway.fetch_by_id(uid(3)));

        assert_eq!(gateway.fetch_by_id(uid(3)), Fetch::Joined);
        assert!(matches!(gateway.fetch_by_id(uid(4)), Fetch::Requested(_)));
        assert!(gateway.is_busy());
    }

    #[test]
    fn not_found_is_normalized_and_not_cached() {
        let mut gateway = gateway();
        let request = requested(gateway.fetch_by_id(uid(999_999)));
        let completion = gateway
            .complete(&HttpResponse::answering(&request, 404, "{}"))
            .unwrap();

        assert_eq!(completion.key, RequestKey::User(uid(999_999)));
        let err = completion.outcome.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
        assert!(gateway.cache().is_empty());
        assert!(!gateway.is_busy());
        assert!(matches!(gateway.fetch_by_id(uid(999_999)), Fetch::Requested(_)));
    }

    #[test]
    fn other_statuses_become_server_errors() {
        let mut gateway = gateway();
        let request = requested(gateway.fetch_page(1));
        let completion = gateway
            .complete(&HttpResponse::answering(&request, 502, "bad gateway"))
            .unwrap();

        assert_eq!(completion.outcome.unwrap_err().to_string(), "Server error: 502");
    }

    #[test]
    fn transport_failure_message_passes_through() {
        let mut gateway = gateway();
        let request = requested(gateway.fetch_by_id(uid(7)));
        let completion = gateway
            .complete(&HttpResponse::transport_failure(&request, "connection reset by peer"))
            .unwrap();

        assert_eq!(
            completion.outcome,
            Err(FetchError::Transport("connection reset by peer".to_string()))
        );
    }

    #[test]
    fn undecodable_success_body_is_a_transport_error() {
        let mut gateway = gateway();
        let request = requested(gateway.fetch_page(1));
        let completion = gateway
            .complete(&HttpResponse::answering(&request, 200, "<html>"))
            .unwrap();

        assert!(matches!(completion.outcome, Err(FetchError::Transport(_))));
        assert!(gateway.cache().is_empty());
    }

    #[test]
    fn response_without_request_key_is_rejected() {
        let mut gateway = gateway();
        let stray = HttpResponse {
            status: 200,
            body: Vec::new(),
            context: BTreeMap::new(),
        };

        assert!(matches!(
            gateway.complete(&stray),
            Err(UserdeckError::UnknownResponse(_))
        ));
    }
}
