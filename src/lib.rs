//! Userdeck: a Zellij plugin for browsing a remote user directory.
//!
//! Userdeck provides:
//! - A paginated listing of users fetched from a REST endpoint
//! - A debounced search box that jumps to a user by id once the id is
//!   confirmed to exist
//! - A detail view per user, reachable from the list or a `/user/<id>` path
//! - Response caching and joining of identical in-flight requests

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, screens, search box              │
//! │  - Timers, notifications, load fan-out              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Gateway       │   │ Search        │
//! │ (ui/)         │   │ (gateway/)    │   │ (search/)     │
//! │ - Rendering   │   │ - Requests    │   │ - Mode        │
//! │ - Theming     │   │ - Cache       │   │   broadcast   │
//! │ - Components  │   │ - Decoding    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types, users and pages (domain/)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! │  - Trace context carried through web requests       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/userdeck.wasm" {
//!         api_base_url "https://reqres.in/api/users"
//!         api_key "reqres-free-v1"
//!         start_path "/"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use userdeck::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     start_path: "/user/2".to_string(),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! let Some(Action::WebRequest(request)) = actions.first() else {
//!     panic!("expected a request");
//! };
//! assert_eq!(request.url, "https://reqres.in/api/users/2");
//! # Ok::<(), userdeck::UserdeckError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod search;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{FetchError, Result, User, UserId, UserPage, UserdeckError};
pub use ui::Theme;

use gateway::{ApiEndpoint, DEFAULT_API_KEY, DEFAULT_BASE_URL};
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listing endpoint; single users live at `<api_base_url>/<id>`.
    pub api_base_url: String,

    /// Sent as the `x-api-key` header.
    pub api_key: String,

    /// Path entered once web access is granted. Default: `/`
    pub start_path: String,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` means the sandbox host root.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            start_path: app::routes::ROOT_PATH.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base_url`: must be an absolute http(s) URL without a query;
    ///   otherwise the default is kept
    /// - `api_key`: any non-blank string
    /// - `start_path`: must begin with `/`
    /// - `theme`, `theme_file`, `trace_level`: taken as-is when non-blank
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use userdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base_url".to_string(), "http://localhost:8080/users".to_string());
    /// map.insert("start_path".to_string(), "/user/4".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base_url, "http://localhost:8080/users");
    /// assert_eq!(config.start_path, "/user/4");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let api_base_url = value("api_base_url")
            .filter(|url| match ApiEndpoint::new(url, DEFAULT_API_KEY) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!(error = %e, "ignoring api_base_url");
                    false
                }
            })
            .unwrap_or(defaults.api_base_url);

        let start_path = value("start_path")
            .filter(|path| {
                let valid = path.starts_with('/');
                if !valid {
                    tracing::debug!(start_path = %path, "ignoring start_path without leading slash");
                }
                valid
            })
            .unwrap_or(defaults.start_path);

        Self {
            api_base_url,
            api_key: value("api_key").unwrap_or(defaults.api_key),
            start_path,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Endpoint described by `api_base_url` and `api_key`.
    ///
    /// Falls back to the default endpoint if the URL does not validate, which
    /// only happens for a hand-built `Config`.
    #[must_use]
    pub fn endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::new(&self.api_base_url, self.api_key.clone()).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "invalid endpoint configuration, using default");
            ApiEndpoint::default()
        })
    }

    /// Resolves the theme: file first, then name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %path.display(), error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates an unstarted `AppState` from configuration.
///
/// Nothing is fetched until [`Event::Start`] is handled, which the plugin
/// sends once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base_url = %config.api_base_url, start_path = %config.start_path, "initializing userdeck plugin");

    AppState::new(config.theme(), config.endpoint()).with_start_path(config.start_path.clone())
}
