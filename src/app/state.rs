//! Application state management and view model computation.
//!
//! [`AppState`] owns everything the plugin knows: the current route and the
//! screen mounted for it, the header search box, and the shared [`Context`]
//! (loader, timers, notifications, search mode coordinator).
//!
//! # Settling
//!
//! After every event the state *settles*: queued search mode broadcasts are
//! applied to the list and finished loads are handed to whoever asked for
//! them, until neither queue has anything left. Applying one may enqueue the
//! other (a cache hit delivers synchronously, a confirmed search publishes a
//! mode change), which is why this is a loop.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::AppState;
//! use userdeck::gateway::ApiEndpoint;
//! use userdeck::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), ApiEndpoint::default());
//! state.navigate("/");
//! let actions = state.take_actions();
//! assert_eq!(actions.len(), 1); // first page request
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.loading);
//! ```

use super::actions::Action;
use super::context::Context;
use super::detail::{Opened, UserDetailView};
use super::header::SearchInput;
use super::list::UserListView;
use super::loader::{Delivery, Loader, PageWaiter, UserWaiter};
use super::modes::InputMode;
use super::notifications::DISMISS_LABEL;
use super::routes::{Route, ROOT_PATH};
use super::timers::{Clock, SystemClock, Timer};
use crate::domain::User;
use crate::gateway::ApiEndpoint;
use crate::search::{SearchModeCoordinator, SearchModeState};
use crate::ui::helpers::{sanitize, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailCard, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PagerInfo, SearchBarInfo,
    ToastInfo, UIViewModel,
};

/// Rows taken by everything except table rows: top line, header, two
/// borders, search box (3), column headers, pager and footer.
const CHROME_ROWS: usize = 10;

/// What is mounted below the header.
#[derive(Debug)]
pub enum Screen {
    /// Nothing yet; the start route is entered once web access is granted.
    Blank,
    Users(UserListView),
    Detail(UserDetailView),
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Which component receives printable keys.
    pub input_mode: InputMode,

    route: Option<Route>,
    start_path: String,
    search: SearchInput,
    screen: Screen,
    ctx: Context,
    clock: Box<dyn Clock>,
    next_mount: u64,
}

impl AppState {
    /// Creates an unstarted state talking to `endpoint`.
    #[must_use]
    pub fn new(theme: Theme, endpoint: ApiEndpoint) -> Self {
        Self {
            theme,
            input_mode: InputMode::Normal,
            route: None,
            start_path: ROOT_PATH.to_string(),
            search: SearchInput::new(),
            screen: Screen::Blank,
            ctx: Context::new(Loader::new(endpoint), SearchModeCoordinator::new()),
            clock: Box::new(SystemClock),
            next_mount: 0,
        }
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Path entered by [`AppState::start`].
    #[must_use]
    pub fn with_start_path(mut self, path: impl Into<String>) -> Self {
        self.start_path = path.into();
        self
    }

    /// Reads the clock; called once at the top of each event.
    pub(crate) fn tick(&mut self) {
        self.ctx.now_ms = self.clock.now_ms();
    }

    /// Enters the start route. Later calls do nothing.
    pub fn start(&mut self) -> bool {
        if self.route.is_some() {
            return false;
        }
        let path = self.start_path.clone();
        self.navigate(&path);
        true
    }

    /// Switches to the screen for `path`.
    ///
    /// Leaving a screen unmounts it, which for the list ends its search mode
    /// subscription. Navigating to the list while it is shown does nothing.
    pub fn navigate(&mut self, path: &str) {
        let route = Route::parse(path);
        if route == Route::Users && matches!(self.screen, Screen::Users(_)) {
            return;
        }

        let _span = tracing::debug_span!("navigate", %route).entered();
        self.screen = Screen::Blank;
        self.route = Some(route.clone());
        self.next_mount += 1;
        let mount = self.next_mount;

        match route {
            Route::Users => {
                self.screen = Screen::Users(UserListView::mount(mount, &mut self.ctx));
            }
            Route::UserDetail(raw) => match UserDetailView::open(mount, &raw, &mut self.ctx) {
                Opened::Loading(view) => self.screen = Screen::Detail(view),
                Opened::Redirect => self.navigate(ROOT_PATH),
            },
        }
        self.settle();
    }

    /// Applies mode broadcasts and load deliveries until both queues are
    /// empty.
    pub(crate) fn settle(&mut self) {
        loop {
            let mut progressed = false;
            if let Screen::Users(list) = &mut self.screen {
                progressed |= list.drain_mode_changes(&mut self.ctx);
            }
            if let Some(delivery) = self.ctx.loader.next_delivery() {
                self.deliver(delivery);
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
    }

    fn deliver(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Page {
                waiter: PageWaiter::List { mount },
                page,
                result,
            } => {
                if let Screen::Users(list) = &mut self.screen {
                    list.on_page(mount, page, result, &mut self.ctx);
                }
            }
            Delivery::User { waiter, id, result } => match waiter {
                UserWaiter::InstantSearch { .. } | UserWaiter::Submit { .. } => {
                    self.search.on_verified(waiter, id, result, &mut self.ctx);
                }
                UserWaiter::ListSearch { mount } => {
                    if let Screen::Users(list) = &mut self.screen {
                        list.on_user(mount, id, result, &mut self.ctx);
                    }
                }
                UserWaiter::Detail { visit } => {
                    if let Screen::Detail(view) = &mut self.screen {
                        view.on_user(visit, result, &mut self.ctx);
                    }
                }
            },
        }
    }

    /// Runs everything whose deadline has passed.
    pub(crate) fn fire_due_timers(&mut self) -> bool {
        let due = self.ctx.timers.take_due(self.ctx.now_ms);
        if due.is_empty() {
            self.ctx.timers.rearm(self.ctx.now_ms);
            return false;
        }

        let mut changed = false;
        for timer in due {
            tracing::debug!(?timer, "timer fired");
            match timer {
                Timer::Debounce { ticket } => {
                    changed |= self.search.debounce_elapsed(ticket, &mut self.ctx);
                }
                Timer::DismissNotification { id } => {
                    changed |= self.ctx.notifications.expire(id);
                }
                Timer::Redirect { visit } => {
                    if matches!(&self.screen, Screen::Detail(view) if view.visit() == visit) {
                        self.navigate(ROOT_PATH);
                        changed = true;
                    }
                }
            }
            self.settle();
        }
        changed
    }

    /// Requests and timeouts produced since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .ctx
            .loader
            .take_requests()
            .into_iter()
            .map(Action::WebRequest)
            .collect();
        actions.extend(
            self.ctx
                .timers
                .take_host_requests()
                .into_iter()
                .map(|seconds| Action::SetTimeout { seconds }),
        );
        actions
    }

    pub(crate) fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub(crate) fn search_and_context(&mut self) -> (&mut SearchInput, &mut Context) {
        (&mut self.search, &mut self.ctx)
    }

    pub fn move_selection_down(&mut self) -> bool {
        match &mut self.screen {
            Screen::Users(list) => {
                list.select_next();
                true
            }
            _ => false,
        }
    }

    pub fn move_selection_up(&mut self) -> bool {
        match &mut self.screen {
            Screen::Users(list) => {
                list.select_previous();
                true
            }
            _ => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        let started = match &mut self.screen {
            Screen::Users(list) => list.next_page(&mut self.ctx),
            _ => false,
        };
        self.settle();
        started
    }

    pub fn previous_page(&mut self) -> bool {
        let started = match &mut self.screen {
            Screen::Users(list) => list.previous_page(&mut self.ctx),
            _ => false,
        };
        self.settle();
        started
    }

    /// Opens the detail of the highlighted row.
    pub fn open_selected(&mut self) -> bool {
        let Screen::Users(list) = &self.screen else {
            return false;
        };
        let Some(id) = list.selected_user().map(|user| user.id) else {
            return false;
        };
        self.navigate(&Route::user(id).to_string());
        true
    }

    /// Leaves the detail view for the list.
    pub fn back(&mut self) -> bool {
        if matches!(self.screen, Screen::Detail(_)) {
            self.navigate(ROOT_PATH);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub const fn search_input(&self) -> &SearchInput {
        &self.search
    }

    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    #[must_use]
    pub fn search_mode(&self) -> SearchModeState {
        self.ctx.coordinator.current()
    }

    /// Computes a renderable UI view model for a `rows` x `cols` pane.
    ///
    /// The table is windowed around the selection when the pane is too short
    /// to show every row.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search.raw().to_string(),
                focused: self.input_mode == InputMode::Typing,
            },
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
            toast: self.ctx.notifications.current().map(|notification| ToastInfo {
                message: sanitize(&notification.message),
                dismiss: format!("{DISMISS_LABEL} [x]"),
            }),
            loading: self.ctx.loader.is_loading(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> Body {
        match &self.screen {
            Screen::Blank => Body::Empty(EmptyState {
                message: "Userdeck".to_string(),
                subtitle: "Waiting for permission to reach the user API".to_string(),
            }),
            Screen::Users(list) => Self::compute_list_body(
                list,
                rows,
                cols,
                self.ctx.loader.is_loading(),
                self.input_mode,
            ),
            Screen::Detail(view) => Self::compute_detail_body(view),
        }
    }

    fn compute_list_body(
        list: &UserListView,
        rows: usize,
        cols: usize,
        loading: bool,
        input_mode: InputMode,
    ) -> Body {
        let users = list.visible_users();

        if users.is_empty() {
            let empty = match list.mode() {
                SearchModeState::Searching(id) if loading => EmptyState {
                    message: format!("Looking up user #{id}..."),
                    subtitle: String::new(),
                },
                SearchModeState::Searching(id) => EmptyState {
                    message: format!("No record shown for user #{id}"),
                    subtitle: match input_mode {
                        InputMode::Normal => "Press c to clear the search",
                        InputMode::Typing => "Esc: clear",
                    }
                    .to_string(),
                },
                SearchModeState::Browsing if loading => EmptyState {
                    message: "Loading users...".to_string(),
                    subtitle: String::new(),
                },
                SearchModeState::Browsing => EmptyState {
                    message: "No users found".to_string(),
                    subtitle: "The directory returned an empty page".to_string(),
                },
            };
            return Body::Empty(empty);
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let selected = list.selected_index();
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(users.len());
        if visible_end - visible_start < available_rows && users.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let searching = list.is_searching();
        let rows = users[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, user)| {
                Self::compute_display_item(user, visible_start + offset == selected, searching, cols)
            })
            .collect();

        let pager = (!searching).then(|| PagerInfo {
            page: list.current_page(),
            total_pages: list.total_pages(),
            total: list.total(),
            has_previous: list.current_page() > 1,
            has_next: list.current_page() < list.total_pages(),
        });

        Body::Table { rows, pager }
    }

    fn compute_display_item(user: &User, is_selected: bool, is_match: bool, cols: usize) -> DisplayItem {
        const ID_COLUMN_WIDTH: usize = 8;
        const NAME_COLUMN_WIDTH: usize = 28;
        let email_width = cols.saturating_sub(ID_COLUMN_WIDTH + NAME_COLUMN_WIDTH + 2);

        DisplayItem {
            id: user.id.to_string(),
            name: truncate(&sanitize(&user.display_name()), NAME_COLUMN_WIDTH - 2),
            email: truncate(&sanitize(&user.email), email_width),
            is_selected,
            is_match,
        }
    }

    fn compute_detail_body(view: &UserDetailView) -> Body {
        let id = view.user_id();
        if let Some(user) = view.user() {
            let mut fields = vec![
                ("ID".to_string(), user.id.to_string()),
                ("First name".to_string(), sanitize(&user.first_name)),
                ("Last name".to_string(), sanitize(&user.last_name)),
                ("Email".to_string(), sanitize(&user.email)),
                ("Avatar".to_string(), sanitize(&user.avatar)),
            ];
            fields.extend(user.extra.iter().map(|(key, value)| {
                let value = value.as_str().map_or_else(|| value.to_string(), str::to_string);
                (sanitize(key), sanitize(&value))
            }));
            return Body::Detail(DetailCard {
                title: sanitize(&user.display_name()),
                fields,
            });
        }

        Body::Empty(if view.has_failed() {
            EmptyState {
                message: format!("Could not load user #{id}"),
                subtitle: "Returning to the user list...".to_string(),
            }
        } else {
            EmptyState {
                message: format!("Loading user #{id}..."),
                subtitle: String::new(),
            }
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.screen {
            Screen::Blank => " Userdeck ".to_string(),
            Screen::Users(list) => match list.mode() {
                SearchModeState::Browsing => format!(" Users ({}) ", list.total()),
                SearchModeState::Searching(id) => format!(" Users: search #{id} "),
            },
            Screen::Detail(view) => format!(" User #{} ", view.user_id()),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, &self.screen) {
            (InputMode::Typing, _) => "Type a user id  Enter: search now  ESC: clear / leave",
            (InputMode::Normal, Screen::Users(list)) if list.is_searching() => {
                "j/k: navigate  Enter: open  /: search  c: clear search  x: dismiss  q: quit"
            }
            (InputMode::Normal, Screen::Users(_)) => {
                "j/k: navigate  h/l: page  Enter: open  /: search  x: dismiss  q: quit"
            }
            (InputMode::Normal, Screen::Detail(_)) => "ESC/b: back  /: search  x: dismiss  q: quit",
            (InputMode::Normal, Screen::Blank) => "q: quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
