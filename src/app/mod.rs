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

pub use model::{
    Model, NEW_FILE_TEXT, ToastLevel, UNTITLED, WELCOME_TEXT, WELCOME_TITLE, body_size,
};
pub use update::{Message, WHEEL_STEP, update};

use std::path::PathBuf;

use tracing::warn;

use crate::config::EditorConfig;
use crate::ui::style::NotebookStyle;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Default)]
pub struct App {
    files: Vec<PathBuf>,
    config: EditorConfig,
    style: NotebookStyle,
}

impl App {
    /// Create an application that opens `files`, one tab each.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    /// Set tab size, tab expansion, wrapping, gutter strategy and whether
    /// the welcome tab is shown.
    #[must_use]
    pub const fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: NotebookStyle) -> Self {
        self.style = style;
        self
    }

    /// Build the initial model: one tab per readable file, the last one
    /// active, or the welcome tab when no files were given. Files that
    /// fail to open are reported with a toast.
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(self.config, self.style.clone(), terminal_size);
        let mut failures = Vec::new();
        for path in &self.files {
            if let Err(err) = model.notebook.open_file(path) {
                warn!(%err, "skipping file");
                failures.push(err.to_string());
            }
        }
        if self.files.is_empty() && self.config.show_welcome {
            model.notebook.open_text(WELCOME_TITLE, WELCOME_TEXT);
        }
        if model.notebook.is_empty() && !self.files.is_empty() {
            model.notebook.open_text(UNTITLED, "");
        }
        if let Some(first) = failures.first() {
            let message = match failures.len() {
                1 => first.clone(),
                n => format!("{first} (and {} more)", n - 1),
            };
            model.show_toast(ToastLevel::Error, message);
        }
        model
    }
}
