//! Deadlines on top of the host's one-shot timeouts.
//!
//! The host only offers "wake me in N seconds" with no payload, so every
//! deadline the application needs (search debounce, toast auto-dismiss,
//! delayed redirect) is kept here with its absolute due time. A host wake-up
//! simply asks the queue what is due.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Host timeouts may fire marginally early; entries due within this window
/// count as due.
pub const FIRE_SLACK_MS: u64 = 25;

/// Source of the current time in milliseconds.
pub trait Clock: fmt::Debug {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Hand-driven clock; clones share the same time.
///
/// # Examples
///
/// ```
/// use userdeck::app::timers::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(400);
/// assert_eq!(clock.now_ms(), 400);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// What a deadline means once it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Quiet period after a keystroke in the search box.
    Debounce { ticket: u64 },
    /// Auto-dismiss of the notification with this id.
    DismissNotification { id: u64 },
    /// Return to the list after a failed detail load.
    Redirect { visit: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_ms: u64,
    seq: u64,
    timer: Timer,
}

/// Pending deadlines plus the host timeouts still to be requested.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_seq: u64,
    host_requests: Vec<f64>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `timer` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, timer: Timer) {
        let due_ms = now_ms + delay_ms;
        self.entries.push(Entry {
            due_ms,
            seq: self.next_seq,
            timer,
        });
        self.next_seq += 1;

        self.request_host_wakeup(delay_ms);
        tracing::trace!(?timer, due_ms, "timer scheduled");
    }

    /// Asks for another host wake-up at the earliest pending deadline.
    ///
    /// Needed when a wake-up arrives too early to fire anything.
    pub fn rearm(&mut self, now_ms: u64) {
        if let Some(due_ms) = self.entries.iter().map(|entry| entry.due_ms).min() {
            self.request_host_wakeup(due_ms.saturating_sub(now_ms));
        }
    }

    fn request_host_wakeup(&mut self, delay_ms: u64) {
        #[allow(clippy::cast_precision_loss)]
        let seconds = delay_ms as f64 / 1000.0;
        self.host_requests.push(seconds);
    }

    /// Drops every pending entry matching `predicate`.
    pub fn cancel(&mut self, predicate: impl Fn(&Timer) -> bool) {
        self.entries.retain(|entry| !predicate(&entry.timer));
    }

    /// Removes and returns everything due by `now_ms`, in due order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<Timer> {
        let horizon = now_ms + FIRE_SLACK_MS;
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) =
            self.entries.iter().partition(|entry| entry.due_ms <= horizon);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.due_ms, entry.seq));
        due.into_iter().map(|entry| entry.timer).collect()
    }

    /// Host timeouts (in seconds) requested since the last call.
    pub fn take_host_requests(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.host_requests)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
