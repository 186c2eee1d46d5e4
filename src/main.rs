//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the Userdeck library and the
//! Zellij plugin system: it translates host events into library events and
//! library actions into host calls. Everything else lives in the library.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; once granted, send `Event::Start`
//! 3. **Update**: Map keys, timers and web results to events, execute actions
//! 4. **Render**: Call the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search box or pane events (see below)
//! - `Timer` → `Event::TimerElapsed`
//! - `WebRequestResult` → `Event::WebResponse`
//! - `PermissionRequestResult(Granted)` → `Event::Start`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `l`/`Right`, `h`/`Left`: Next / previous page
//! - `Enter`: Open the selected user
//! - `Esc`/`b`/`Backspace`: Back to the list
//! - `/`: Focus the search box
//! - `c`: Clear the search
//! - `x`: Dismiss the notification
//! - `q`: Close plugin
//!
//! In the search box:
//! - any character: Type
//! - `Enter`: Search now
//! - `Esc`: Clear the box, or leave it when already empty
//! - `Tab`: Leave the box, keeping the search

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use userdeck::gateway::HttpResponse;
    use userdeck::{handle_event, Action, Config, Event, InputMode};
    use zellij_tile::prelude::*;

    /// Plugin state wrapper around the library's `AppState`.
    pub struct State {
        app: userdeck::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: userdeck::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, initializes tracing and state, requests
        /// permissions and subscribes to events.
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            userdeck::observability::init_tracing(&config);

            let _guard = tracing::debug_span!("plugin_load").entered();
            tracing::debug!(api_base_url = %config.api_base_url, start_path = %config.start_path, "parsed configuration");
            self.app = userdeck::initialize(&config);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
                EventType::Timer,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        /// Translates a Zellij event, delegates to `handle_event`, and executes
        /// resulting actions. Returns `true` if the UI should re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::Timer(_) => Event::TimerElapsed,
                zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                    Event::WebResponse(HttpResponse::from_host(status, &headers, body, context))
                }
                zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                    tracing::debug!("web access granted");
                    Event::Start
                }
                zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                    tracing::warn!("web access denied - nothing can be loaded");
                    return false;
                }
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    for action in &actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            userdeck::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::debug!(bare_key = ?key.bare_key, "key event");

            if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::KeyDown);
            }
            if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::KeyUp);
            }

            match self.app.input_mode {
                InputMode::Typing => Some(match key.bare_key {
                    BareKey::Enter => Event::SubmitSearch,
                    BareKey::Esc if self.app.search_input().raw().is_empty() => Event::LeaveSearch,
                    BareKey::Esc => Event::ClearSearch,
                    BareKey::Tab => Event::LeaveSearch,
                    BareKey::Backspace => Event::Backspace,
                    BareKey::Down => Event::KeyDown,
                    BareKey::Up => Event::KeyUp,
                    BareKey::Char(c) => Event::Char(c),
                    _ => return None,
                }),
                InputMode::Normal => Some(match key.bare_key {
                    BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                    BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                    BareKey::Right | BareKey::Char('l') => Event::NextPage,
                    BareKey::Left | BareKey::Char('h') => Event::PrevPage,
                    BareKey::Enter => Event::Open,
                    BareKey::Esc | BareKey::Backspace | BareKey::Char('b') => Event::Back,
                    BareKey::Char('/') => Event::FocusSearch,
                    BareKey::Char('c') => Event::ClearSearch,
                    BareKey::Char('x') => Event::DismissNotification,
                    BareKey::Char('q') => Event::CloseFocus,
                    _ => return None,
                }),
            }
        }

        /// Translates library actions to Zellij API calls.
        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::WebRequest(request) => {
                    web_request(
                        &request.url,
                        HttpVerb::Get,
                        request.headers.clone(),
                        vec![],
                        request.context.clone(),
                    );
                }
                Action::SetTimeout { seconds } => set_timeout(*seconds),
            }
        }
    }
}

#[cfg(target_family = "wasm")]
use plugin::State;

#[cfg(target_family = "wasm")]
zellij_tile::register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("userdeck is a Zellij plugin; build it for wasm32-wasip1 and load it from a layout");
}
