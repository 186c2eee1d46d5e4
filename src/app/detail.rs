//! Single user record opened from the list or a `/user/<id>` path.

use super::context::Context;
use super::loader::UserWaiter;
use super::routes::resolve_user_id;
use super::timers::Timer;
use crate::domain::{FetchError, User, UserId};

/// Lifetime of the load failure notification.
pub const DETAIL_ERROR_MS: u64 = 5000;

/// Delay between a failed load and the automatic return to the list.
pub const REDIRECT_DELAY_MS: u64 = 2000;

/// What opening a detail path led to.
#[derive(Debug)]
pub enum Opened {
    /// The id was valid and a load is under way (or already delivered).
    Loading(UserDetailView),
    /// The id was not a positive integer; go back to the list right away.
    Redirect,
}

#[derive(Debug)]
pub struct UserDetailView {
    visit: u64,
    user_id: UserId,
    user: Option<User>,
    failed: bool,
}

impl UserDetailView {
    /// Validates `raw` and starts loading the record.
    ///
    /// An invalid id issues no request.
    pub fn open(visit: u64, raw: &str, ctx: &mut Context) -> Opened {
        let Some(user_id) = resolve_user_id(raw) else {
            tracing::debug!(visit, raw, "invalid user id in path, redirecting");
            return Opened::Redirect;
        };

        tracing::debug!(visit, %user_id, "opening user detail");
        ctx.loader.load_user(user_id, UserWaiter::Detail { visit });
        Opened::Loading(Self {
            visit,
            user_id,
            user: None,
            failed: false,
        })
    }

    /// Applies the load answer for this visit.
    ///
    /// A failure shows a notification and arms the redirect back to the list.
    pub fn on_user(&mut self, visit: u64, result: Result<User, FetchError>, ctx: &mut Context) {
        if visit != self.visit {
            return;
        }

        match result {
            Ok(user) => {
                self.user = Some(user);
                self.failed = false;
            }
            Err(e) => {
                tracing::debug!(visit, user_id = %self.user_id, error = %e, "user detail failed");
                self.failed = true;
                ctx.notify(format!("Failed to load user: {e}"), DETAIL_ERROR_MS);
                ctx.schedule(REDIRECT_DELAY_MS, Timer::Redirect { visit });
            }
        }
    }

    #[must_use]
    pub const fn visit(&self) -> u64 {
        self.visit
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// Still waiting for the first answer.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.user.is_none() && !self.failed
    }
}
