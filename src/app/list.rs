//! The paginated user list.
//!
//! The view renders in one of two modes, decided solely by the search mode
//! broadcasts it receives:
//!
//! - **Browsing**: the page `current_page` of the listing, navigable with
//!   `h`/`l`
//! - **Searching(id)**: exactly the record for `id`, highlighted
//!
//! Broadcasts are queued in an inbox by the subscription and applied by
//! [`UserListView::drain_mode_changes`], so the coordinator never calls into
//! the view while it is borrowed.
//!
//! A failed search load leaves the view in search mode with no record shown;
//! the clear action is the way back.

use super::context::Context;
use super::loader::{PageWaiter, UserWaiter};
use crate::domain::{FetchError, User, UserId, UserPage};
use crate::search::{SearchModeState, Subscription};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Lifetime of list load failure notifications.
pub const LIST_ERROR_MS: u64 = 5000;

/// Page size assumed until the first page arrives.
pub const DEFAULT_PER_PAGE: u32 = 6;

#[derive(Debug)]
pub struct UserListView {
    mount: u64,
    mode: SearchModeState,
    inbox: Rc<RefCell<VecDeque<SearchModeState>>>,
    subscription: Option<Subscription>,
    users: Vec<User>,
    current_page: u32,
    requested_page: u32,
    per_page: u32,
    total: u32,
    total_pages: u32,
    searched_user: Option<User>,
    selected: usize,
}

impl UserListView {
    /// Mounts the view: requests page 1 and subscribes to search mode.
    ///
    /// The subscription replays the current mode right away, so a list
    /// remounted while a search is active goes straight back to it.
    pub fn mount(mount: u64, ctx: &mut Context) -> Self {
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let mut view = Self {
            mount,
            mode: SearchModeState::Browsing,
            inbox: Rc::clone(&inbox),
            subscription: None,
            users: Vec::new(),
            current_page: 1,
            requested_page: 1,
            per_page: DEFAULT_PER_PAGE,
            total: 0,
            total_pages: 0,
            searched_user: None,
            selected: 0,
        };

        tracing::debug!(mount, "mounting user list");
        ctx.loader.load_page(1, PageWaiter::List { mount });
        view.subscription = Some(
            ctx.coordinator
                .subscribe(move |state| inbox.borrow_mut().push_back(state)),
        );
        view
    }

    #[must_use]
    pub const fn mount_id(&self) -> u64 {
        self.mount
    }

    /// Applies queued search mode broadcasts. Returns whether any were queued.
    pub fn drain_mode_changes(&mut self, ctx: &mut Context) -> bool {
        let mut drained = false;
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(state) = next else {
                return drained;
            };
            drained = true;
            self.apply_mode(state, ctx);
        }
    }

    fn apply_mode(&mut self, state: SearchModeState, ctx: &mut Context) {
        tracing::debug!(mount = self.mount, ?state, "list mode change");
        self.mode = state;
        self.selected = 0;

        match state {
            SearchModeState::Browsing => {
                self.searched_user = None;
                self.request_page(self.current_page, ctx);
            }
            SearchModeState::Searching(id) => {
                self.searched_user = None;
                ctx.loader
                    .load_user(id, UserWaiter::ListSearch { mount: self.mount });
            }
        }
    }

    fn request_page(&mut self, page: u32, ctx: &mut Context) {
        self.requested_page = page;
        ctx.loader
            .load_page(page, PageWaiter::List { mount: self.mount });
    }

    /// Applies a page answer addressed to this mount.
    pub fn on_page(
        &mut self,
        mount: u64,
        page: u32,
        result: Result<UserPage, FetchError>,
        ctx: &mut Context,
    ) {
        if mount != self.mount || page != self.requested_page {
            tracing::debug!(mount, page, requested = self.requested_page, "superseded page load ignored");
            return;
        }

        match result {
            Ok(data) => {
                tracing::debug!(page = data.page, users = data.data.len(), "page loaded");
                self.users = data.data;
                self.current_page = data.page;
                self.requested_page = data.page;
                self.per_page = data.per_page;
                self.total = data.total;
                self.total_pages = data.total_pages;
                self.clamp_selection();
            }
            Err(e) => ctx.notify(format!("Failed to load users: {e}"), LIST_ERROR_MS),
        }
    }

    /// Applies a searched-record answer addressed to this mount.
    pub fn on_user(
        &mut self,
        mount: u64,
        id: UserId,
        result: Result<User, FetchError>,
        ctx: &mut Context,
    ) {
        if mount != self.mount || self.mode != SearchModeState::Searching(id) {
            tracing::debug!(mount, %id, "search result no longer wanted");
            return;
        }

        match result {
            Ok(user) => self.searched_user = Some(user),
            Err(e) => ctx.notify(format!("Failed to load user: {e}"), LIST_ERROR_MS),
        }
    }

    /// Moves to the next page while browsing. Returns whether a load started.
    pub fn next_page(&mut self, ctx: &mut Context) -> bool {
        self.go_to_page(self.current_page.saturating_add(1), ctx)
    }

    /// Moves to the previous page while browsing.
    pub fn previous_page(&mut self, ctx: &mut Context) -> bool {
        self.go_to_page(self.current_page.saturating_sub(1), ctx)
    }

    /// Loads `page` if browsing and `page` lies within `1..=total_pages`.
    pub fn go_to_page(&mut self, page: u32, ctx: &mut Context) -> bool {
        if self.is_searching() || page == 0 || page > self.total_pages || page == self.current_page {
            return false;
        }
        tracing::debug!(from = self.current_page, to = page, "page change");
        self.request_page(page, ctx);
        true
    }

    pub fn select_next(&mut self) {
        let count = self.visible_users().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.visible_users().len();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_users().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// The user the cursor is on, if any row is shown.
    #[must_use]
    pub fn selected_user(&self) -> Option<&User> {
        self.visible_users().get(self.selected)
    }

    /// Rows currently rendered: the page in browse mode, the searched record
    /// (or nothing) in search mode.
    #[must_use]
    pub fn visible_users(&self) -> &[User] {
        match self.mode {
            SearchModeState::Browsing => &self.users,
            SearchModeState::Searching(_) => self.searched_user.as_slice(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SearchModeState {
        self.mode
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        matches!(self.mode, SearchModeState::Searching(_))
    }

    #[must_use]
    pub const fn searched_user(&self) -> Option<&User> {
        self.searched_user.as_ref()
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::loader::{Delivery, Loader};
    use crate::gateway::ApiEndpoint;
    use crate::search::SearchModeCoordinator;

    fn context() -> Context {
        Context::new(Loader::new(ApiEndpoint::default()), SearchModeCoordinator::new())
    }

    fn user(id: u64) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "email": format!("user{id}@reqres.in"),
            "first_name": "User",
            "last_name": id.to_string(),
        }))
        .unwrap()
    }

    fn page(n: u32) -> UserPage {
        let first = u64::from(n - 1) * 6 + 1;
        UserPage {
            data: (first..first + 6).map(user).collect(),
            page: n,
            per_page: 6,
            total: 12,
            total_pages: 2,
        }
    }

    #[test]
    fn mount_requests_first_page_and_replays_mode() {
        let mut ctx = context();
        let mut view = UserListView::mount(1, &mut ctx);

        assert_eq!(ctx.loader.take_requests().len(), 1);
        assert!(view.drain_mode_changes(&mut ctx));
        assert!(!view.drain_mode_changes(&mut ctx));
        assert_eq!(view.mode(), SearchModeState::Browsing);
        assert_eq!(ctx.coordinator.subscriber_count(), 1);

        drop(view);
        assert_eq!(ctx.coordinator.subscriber_count(), 0);
    }

    #[test]
    fn paging_is_bounded_by_total_pages() {
        let mut ctx = context();
        let mut view = UserListView::mount(1, &mut ctx);
        view.on_page(1, 1, Ok(page(1)), &mut ctx);

        assert!(!view.previous_page(&mut ctx));
        assert!(view.next_page(&mut ctx));
        view.on_page(1, 2, Ok(page(2)), &mut ctx);
        assert_eq!(view.current_page(), 2);
        assert!(!view.next_page(&mut ctx));
    }

    #[test]
    fn superseded_page_answer_is_ignored() {
        let mut ctx = context();
        let mut view = UserListView::mount(1, &mut ctx);
        view.on_page(1, 1, Ok(page(1)), &mut ctx);
        view.next_page(&mut ctx);

        view.on_page(1, 1, Ok(page(1)), &mut ctx);
        view.on_page(9, 2, Ok(page(2)), &mut ctx);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn selection_wraps_over_visible_rows() {
        let mut ctx = context();
        let mut view = UserListView::mount(1, &mut ctx);
        view.on_page(1, 1, Ok(page(1)), &mut ctx);

        view.select_previous();
        assert_eq!(view.selected_user().map(|u| u.id.get()), Some(6));
        view.select_next();
        assert_eq!(view.selected_user().map(|u| u.id.get()), Some(1));
    }

    #[test]
    fn search_mode_shows_only_the_searched_record() {
        let mut ctx = context();
        let mut view = UserListView::mount(1, &mut ctx);
        view.drain_mode_changes(&mut ctx);
        view.on_page(1, 1, Ok(page(1)), &mut ctx);

        let id = UserId::new(3).unwrap();
        ctx.coordinator.set_search_mode(id);
        view.drain_mode_changes(&mut ctx);
        assert!(view.visible_users().is_empty());
        assert!(!view.next_page(&mut ctx));

        view.on_user(1, id, Ok(user(3)), &mut ctx);
        assert_eq!(view.visible_users().len(), 1);
        assert_eq!(view.searched_user().map(|u| u.id), Some(id));
        while let Some(delivery) = ctx.loader.next_delivery() {
            assert!(matches!(delivery, Delivery::Page { .. } | Delivery::User { .. }));
        }
    }
}
