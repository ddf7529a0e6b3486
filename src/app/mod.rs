//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::RequestExport;
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::outbound::ApiSettings;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    initial_text: String,
    outline_visible: bool,
    api: ApiSettings,
    language: String,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for text loaded from `file_path`.
    ///
    /// `file_path` is `None` when the text came from stdin.
    pub fn new(file_path: Option<PathBuf>, initial_text: String) -> Self {
        Self {
            file_path,
            initial_text,
            outline_visible: true,
            api: ApiSettings::default(),
            language: "spanish".to_string(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set initial outline pane visibility.
    pub const fn with_outline_visible(mut self, visible: bool) -> Self {
        self.outline_visible = visible;
        self
    }

    /// Endpoint used when exporting requests.
    pub fn with_api_settings(mut self, api: ApiSettings) -> Self {
        self.api = api;
        self
    }

    /// Language of the suggested audio file name.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
