//! The header search box.
//!
//! Typing runs a debounced pipeline that ends in an existence check; only a
//! confirmed id reaches the [`SearchModeCoordinator`](crate::search::SearchModeCoordinator):
//!
//! ```text
//! keystroke ─► debounce 400ms ─► trim ─► dedupe ─┬─ empty ─► clear_search_mode
//!                                                └─ parse ─► fetch_by_id ─┬─ ok  ─► set_search_mode
//!                                                                         └─ err ─► notification
//! ```
//!
//! Debounce uses a ticket: each keystroke bumps it and arms a timer carrying
//! the new value, so only the last timer in a burst does anything. Every run
//! past deduplication bumps a generation; a verification answering an older
//! generation is dropped without touching mode or notifications.

use super::context::Context;
use super::loader::UserWaiter;
use super::timers::Timer;
use crate::domain::{FetchError, User, UserId};

/// Quiet period before typed input is looked up.
pub const DEBOUNCE_MS: u64 = 400;

/// Lifetime of a search failure notification.
pub const SEARCH_ERROR_MS: u64 = 3000;

/// Reads an id the way a lenient integer parse would: optional `+`, then the
/// leading run of decimal digits. Trailing garbage is ignored; zero, a
/// missing digit run or overflow yield `None`.
///
/// # Examples
///
/// ```
/// use userdeck::app::header::parse_leading_id;
///
/// assert_eq!(parse_leading_id("12abc").map(|id| id.get()), Some(12));
/// assert_eq!(parse_leading_id("abc"), None);
/// assert_eq!(parse_leading_id("-4"), None);
/// ```
#[must_use]
pub fn parse_leading_id(value: &str) -> Option<UserId> {
    let unsigned = value.strip_prefix('+').unwrap_or(value);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<u64>().ok().and_then(UserId::new)
}

#[derive(Debug, Default)]
pub struct SearchInput {
    raw: String,
    /// Value as of the latest keystroke; what the armed debounce will process.
    pending: String,
    ticket: u64,
    generation: u64,
    last_distinct: Option<String>,
}

impl SearchInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the box.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn push(&mut self, c: char, ctx: &mut Context) {
        self.raw.push(c);
        self.changed(ctx);
    }

    pub fn backspace(&mut self, ctx: &mut Context) {
        if self.raw.pop().is_some() {
            self.changed(ctx);
        }
    }

    /// Replaces the whole value at once, as a paste would.
    pub fn set_value(&mut self, value: &str, ctx: &mut Context) {
        value.clone_into(&mut self.raw);
        self.changed(ctx);
    }

    fn changed(&mut self, ctx: &mut Context) {
        self.ticket += 1;
        self.pending.clone_from(&self.raw);
        ctx.timers.cancel(|timer| matches!(timer, Timer::Debounce { .. }));
        ctx.schedule(DEBOUNCE_MS, Timer::Debounce { ticket: self.ticket });
    }

    /// Runs the pipeline if `ticket` is still the latest keystroke.
    ///
    /// Returns `true` when the run changed something or started a lookup.
    pub fn debounce_elapsed(&mut self, ticket: u64, ctx: &mut Context) -> bool {
        if ticket != self.ticket {
            return false;
        }

        let value = self.pending.trim().to_string();
        if self.last_distinct.as_deref() == Some(value.as_str()) {
            tracing::debug!(value = %value, "search value unchanged, skipping");
            return false;
        }
        self.last_distinct = Some(value.clone());
        self.generation += 1;

        if value.is_empty() {
            ctx.coordinator.clear_search_mode();
            return true;
        }

        let Some(id) = parse_leading_id(&value) else {
            tracing::debug!(value = %value, "not a user id yet");
            return false;
        };

        tracing::debug!(%id, generation = self.generation, "verifying searched id");
        ctx.loader.load_user(
            id,
            UserWaiter::InstantSearch {
                generation: self.generation,
            },
        );
        true
    }

    /// Enter: verify the current value immediately.
    ///
    /// Invalid input is ignored. A valid id supersedes any pending debounce and
    /// any verification already in flight.
    pub fn submit(&mut self, ctx: &mut Context) -> bool {
        let value = self.raw.trim().to_string();
        let Some(id) = parse_leading_id(&value) else {
            return false;
        };

        self.ticket += 1;
        ctx.timers.cancel(|timer| matches!(timer, Timer::Debounce { .. }));
        self.last_distinct = Some(value);
        self.generation += 1;

        tracing::debug!(%id, generation = self.generation, "submitting searched id");
        ctx.loader.load_user(
            id,
            UserWaiter::Submit {
                generation: self.generation,
            },
        );
        true
    }

    /// Clear action: empties the box, abandons pending work, returns to
    /// browsing.
    pub fn clear(&mut self, ctx: &mut Context) {
        self.raw.clear();
        self.pending.clear();
        self.ticket += 1;
        self.generation += 1;
        self.last_distinct = Some(String::new());
        ctx.timers.cancel(|timer| matches!(timer, Timer::Debounce { .. }));
        ctx.coordinator.clear_search_mode();
    }

    /// Applies a verification answer addressed to the search box.
    pub fn on_verified(
        &mut self,
        waiter: UserWaiter,
        id: UserId,
        result: Result<User, FetchError>,
        ctx: &mut Context,
    ) {
        let (generation, submitted) = match waiter {
            UserWaiter::InstantSearch { generation } => (generation, false),
            UserWaiter::Submit { generation } => (generation, true),
            UserWaiter::ListSearch { .. } | UserWaiter::Detail { .. } => return,
        };

        if generation != self.generation {
            tracing::debug!(%id, generation, current = self.generation, "stale verification discarded");
            return;
        }

        match result {
            Ok(_) => {
                ctx.coordinator.set_search_mode(id);
                if submitted {
                    self.raw.clear();
                }
            }
            Err(e) => ctx.notify(e.to_string(), SEARCH_ERROR_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::loader::Loader;
    use crate::gateway::ApiEndpoint;
    use crate::search::{SearchModeCoordinator, SearchModeState};
    use rstest::rstest;

    fn context() -> Context {
        Context::new(Loader::new(ApiEndpoint::default()), SearchModeCoordinator::new())
    }

    #[rstest]
    #[case("123", Some(123))]
    #[case("+5", Some(5))]
    #[case("007", Some(7))]
    #[case("3.9", Some(3))]
    #[case("0", None)]
    #[case("", None)]
    #[case("x1", None)]
    #[case("99999999999999999999999", None)]
    fn leading_digits_decide_the_id(#[case] raw: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_leading_id(raw).map(UserId::get), expected);
    }

    #[test]
    fn only_the_latest_keystroke_runs_the_pipeline() {
        let mut ctx = context();
        let mut input = SearchInput::new();
        for c in "12".chars() {
            input.push(c, &mut ctx);
        }

        assert!(!input.debounce_elapsed(1, &mut ctx));
        assert!(input.debounce_elapsed(2, &mut ctx));

        let requests = ctx.loader.take_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/12"));
    }

    #[test]
    fn whitespace_only_change_is_deduplicated() {
        let mut ctx = context();
        let mut input = SearchInput::new();
        input.set_value("4", &mut ctx);
        assert!(input.debounce_elapsed(1, &mut ctx));
        ctx.loader.take_requests();

        input.set_value(" 4 ", &mut ctx);
        assert!(!input.debounce_elapsed(2, &mut ctx));
        assert!(ctx.loader.take_requests().is_empty());
    }

    #[test]
    fn invalid_submit_does_nothing() {
        let mut ctx = context();
        let mut input = SearchInput::new();
        input.set_value("abc", &mut ctx);

        assert!(!input.submit(&mut ctx));
        assert_eq!(input.raw(), "abc");
        assert!(ctx.loader.take_requests().is_empty());
    }

    #[test]
    fn clear_returns_to_browsing_without_lookup() {
        let mut ctx = context();
        ctx.coordinator.set_search_mode(UserId::new(2).unwrap());
        let mut input = SearchInput::new();
        input.set_value("2", &mut ctx);

        input.clear(&mut ctx);

        assert_eq!(input.raw(), "");
        assert_eq!(ctx.coordinator.current(), SearchModeState::Browsing);
        assert!(!input.debounce_elapsed(1, &mut ctx));
        assert!(ctx.loader.take_requests().is_empty());
        assert!(ctx.timers.is_empty());
    }
}
