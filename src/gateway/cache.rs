//! Response cache port and its default in-memory adapter.
//!
//! The gateway talks to the cache only through [`ResponseCache`], so an
//! eviction or staleness policy can replace [`UnboundedCache`] without any
//! caller noticing.

use super::key::RequestKey;
use crate::domain::{User, UserPage};
use std::collections::HashMap;

/// A decoded successful response body.
///
/// Single-user responses are stored already unwrapped from their envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Page(UserPage),
    User(User),
}

/// Storage for successful responses, keyed by request identity.
pub trait ResponseCache {
    /// Returns the cached payload for `key`, if still valid under this policy.
    fn get(&mut self, key: &RequestKey) -> Option<Payload>;

    /// Records a successful payload for `key`.
    fn put(&mut self, key: RequestKey, payload: Payload);

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Whether the cache holds nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime cache that never evicts and never invalidates.
///
/// Sound only while the remote directory is treated as read-only for the
/// session. Anything that can mutate users upstream needs a different
/// [`ResponseCache`].
#[derive(Debug, Clone, Default)]
pub struct UnboundedCache {
    entries: HashMap<RequestKey, Payload>,
}

impl UnboundedCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for UnboundedCache {
    fn get(&mut self, key: &RequestKey) -> Option<Payload> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: RequestKey, payload: Payload) {
        self.entries.insert(key, payload);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> Payload {
        Payload::Page(UserPage {
            data: vec![],
            page: n,
            per_page: 6,
            total: 12,
            total_pages: 2,
        })
    }

    #[test]
    fn entries_are_kept_per_key() {
        let mut cache = UnboundedCache::new();
        assert!(cache.is_empty());

        cache.put(RequestKey::Page(1), page(1));
        cache.put(RequestKey::Page(2), page(2));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&RequestKey::Page(2)), Some(page(2)));
        assert_eq!(cache.get(&RequestKey::Page(3)), None);
    }

    #[test]
    fn later_put_overwrites() {
        let mut cache = UnboundedCache::new();
        cache.put(RequestKey::Page(1), page(1));
        cache.put(RequestKey::Page(1), page(9));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&RequestKey::Page(1)), Some(page(9)));
    }
}
