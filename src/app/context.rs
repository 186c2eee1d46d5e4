//! Shared services handed to the header and the views.
//!
//! Views never own the loader, timers or coordinator; [`AppState`](super::AppState)
//! owns one [`Context`] and lends it out for the duration of each call.

use super::loader::Loader;
use super::notifications::Notifications;
use super::timers::{Timer, TimerQueue};
use crate::search::SearchModeCoordinator;

#[derive(Debug)]
pub struct Context {
    pub loader: Loader,
    pub timers: TimerQueue,
    pub notifications: Notifications,
    pub coordinator: SearchModeCoordinator,
    /// Time of the event being handled.
    pub now_ms: u64,
}

impl Context {
    #[must_use]
    pub fn new(loader: Loader, coordinator: SearchModeCoordinator) -> Self {
        Self {
            loader,
            timers: TimerQueue::new(),
            notifications: Notifications::new(),
            coordinator,
            now_ms: 0,
        }
    }

    /// Arms `timer` relative to the current event time.
    pub fn schedule(&mut self, delay_ms: u64, timer: Timer) {
        self.timers.schedule(self.now_ms, delay_ms, timer);
    }

    /// Shows a notification and arms its auto-dismiss.
    pub fn notify(&mut self, message: impl Into<String>, duration_ms: u64) {
        let id = self.notifications.show(message, duration_ms);
        self.schedule(duration_ms, Timer::DismissNotification { id });
    }
}
