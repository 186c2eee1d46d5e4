//! Drives `AppState` through `handle_event` the way the plugin shim does,
//! with a hand-advanced clock and web requests answered by the test.

#![allow(dead_code)]

use serde_json::json;
use userdeck::app::list::UserListView;
use userdeck::app::{handle_event, Action, AppState, Event, InputMode, ManualClock, Screen};
use userdeck::gateway::{ApiEndpoint, HttpRequest, HttpResponse};
use userdeck::search::SearchModeState;
use userdeck::{Theme, UserId};

pub struct Harness {
    pub state: AppState,
    pub clock: ManualClock,
    /// Requests sent to the host and not answered yet.
    pub pending: Vec<HttpRequest>,
    /// Every URL requested so far, in order.
    pub requested: Vec<String>,
    pub timeouts: Vec<f64>,
}

impl Harness {
    /// Not started: nothing is mounted until `Event::Start`.
    pub fn new(start_path: &str) -> Self {
        let clock = ManualClock::new();
        let state = AppState::new(Theme::default(), ApiEndpoint::default())
            .with_clock(clock.clone())
            .with_start_path(start_path);
        Self {
            state,
            clock,
            pending: Vec::new(),
            requested: Vec::new(),
            timeouts: Vec::new(),
        }
    }

    pub fn started(start_path: &str) -> Self {
        let mut harness = Self::new(start_path);
        harness.send(Event::Start);
        harness
    }

    /// Started on the list with page 1 (ids 1 to 6 of 12) answered.
    pub fn on_list() -> Self {
        let mut harness = Self::started("/");
        harness.answer(&page_url(1), 200, &page_body(1, 2, &[1, 2, 3, 4, 5, 6]));
        harness
    }

    pub fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event).expect("event handled");
        for action in actions {
            match action {
                Action::WebRequest(request) => {
                    self.requested.push(request.url.clone());
                    self.pending.push(request);
                }
                Action::SetTimeout { seconds } => self.timeouts.push(seconds),
                Action::CloseFocus => {}
            }
        }
        render
    }

    /// Focuses the search box if needed, then types `text` one key at a time.
    pub fn type_text(&mut self, text: &str) {
        if self.state.input_mode != InputMode::Typing {
            self.send(Event::FocusSearch);
        }
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    /// Moves the clock forward and delivers the host's timer callback.
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.send(Event::TimerElapsed);
    }

    /// Removes the pending request for `url`.
    pub fn take_request(&mut self, url: &str) -> HttpRequest {
        let position = self
            .pending
            .iter()
            .position(|request| request.url == url)
            .unwrap_or_else(|| panic!("no pending request for {url}; pending: {:?}", self.pending_urls()));
        self.pending.remove(position)
    }

    pub fn answer(&mut self, url: &str, status: u16, body: &str) {
        let request = self.take_request(url);
        self.send(Event::WebResponse(HttpResponse::answering(&request, status, body)));
    }

    pub fn fail_transport(&mut self, url: &str, message: &str) {
        let request = self.take_request(url);
        self.send(Event::WebResponse(HttpResponse::transport_failure(&request, message)));
    }

    pub fn pending_urls(&self) -> Vec<&str> {
        self.pending.iter().map(|request| request.url.as_str()).collect()
    }

    pub fn times_requested(&self, url: &str) -> usize {
        self.requested.iter().filter(|requested| *requested == url).count()
    }

    pub fn list(&self) -> &UserListView {
        match self.state.screen() {
            Screen::Users(list) => list,
            other => panic!("expected the user list, found {other:?}"),
        }
    }

    pub fn mode(&self) -> SearchModeState {
        self.state.search_mode()
    }

    pub fn notification(&self) -> Option<&str> {
        self.state
            .context()
            .notifications
            .current()
            .map(|notification| notification.message.as_str())
    }
}

pub fn id(value: u64) -> UserId {
    UserId::new(value).expect("positive id")
}

pub fn page_url(page: u32) -> String {
    ApiEndpoint::default().page_url(page)
}

pub fn user_url(value: u64) -> String {
    ApiEndpoint::default().user_url(id(value))
}

fn user_json(value: u64) -> serde_json::Value {
    json!({
        "id": value,
        "email": format!("user{value}@reqres.in"),
        "first_name": format!("First{value}"),
        "last_name": format!("Last{value}"),
        "avatar": format!("https://reqres.in/img/faces/{value}-image.jpg"),
    })
}

/// Listing envelope for a 6-per-page directory.
pub fn page_body(page: u32, total_pages: u32, ids: &[u64]) -> String {
    json!({
        "page": page,
        "per_page": 6,
        "total": total_pages * 6,
        "total_pages": total_pages,
        "data": ids.iter().map(|value| user_json(*value)).collect::<Vec<_>>(),
    })
    .to_string()
}

/// Single-record envelope.
pub fn user_body(value: u64) -> String {
    json!({ "data": user_json(value) }).to_string()
}
