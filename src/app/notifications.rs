//! Transient notification (toast) shown at the top of the pane.

/// Label of the dismiss action rendered next to every message.
pub const DISMISS_LABEL: &str = "Close";

/// A message waiting to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub duration_ms: u64,
}

/// Holds at most one notification; a newer one replaces the older.
#[derive(Debug, Default)]
pub struct Notifications {
    current: Option<Notification>,
    next_id: u64,
}

impl Notifications {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is showing and returns the id to expire later.
    pub fn show(&mut self, message: impl Into<String>, duration_ms: u64) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.into(),
            duration_ms,
        };
        tracing::debug!(id = notification.id, message = %notification.message, duration_ms, "notification shown");
        self.current = Some(notification);
        self.next_id
    }

    /// The user pressed the dismiss action.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Auto-dismiss; does nothing if `id` has already been replaced.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
