use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::EditorConfig;
use crate::editor::{ChangeDetector, TextArea};
use crate::error::Result;
use crate::tabs::{FileTab, Notebook, TabId};
use crate::ui::style::NotebookStyle;

/// Text of the tab shown when no files are opened.
pub const WELCOME_TITLE: &str = "Welcome to Codingg";
pub const WELCOME_TEXT: &str = "Welcome to Codingg!\nThis is a simple text editor for the terminal, written in Rust.";

/// Title and hint text of a tab opened with Ctrl+N.
pub const UNTITLED: &str = "untitled";
pub const NEW_FILE_TEXT: &str =
    "Open new file or select a language.\nStart typing and save to create an new file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    pub notebook: Notebook,
    pub config: EditorConfig,
    /// Last known terminal size, including tab strip and status bar.
    pub terminal_size: (u16, u16),
    /// Text most recently copied or cut inside the editor.
    clipboard: Option<String>,
    /// Set when `clipboard` changed and the terminal has not been told yet.
    clipboard_unsent: bool,
    toast: Option<Toast>,
    pub should_quit: bool,
    /// Set after the first quit request with modified tabs.
    pub quit_confirmed: bool,
    /// Tab whose modified contents were already warned about on close.
    pub close_confirmed: Option<TabId>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("tabs", &self.notebook.len())
            .field("active", &self.notebook.active_index())
            .field("terminal_size", &self.terminal_size)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(config: EditorConfig, style: NotebookStyle, terminal_size: (u16, u16)) -> Self {
        let mut notebook = Notebook::new(style, config.tab_options());
        let (width, height) = body_size(terminal_size);
        if let Err(err) = notebook.set_body(width, height) {
            warn!(%err, "initial layout failed");
        }
        Self {
            notebook,
            config,
            terminal_size,
            clipboard: None,
            clipboard_unsent: false,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            close_confirmed: None,
        }
    }

    pub fn active_tab(&self) -> Option<&FileTab> {
        self.notebook.active()
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut FileTab> {
        self.notebook.active_mut()
    }

    /// Turn a failure into an error toast.
    pub(super) fn report<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%err, "operation failed");
                self.show_toast(ToastLevel::Error, err.to_string());
                None
            }
        }
    }

    /// Run an operation on the active tab. With no tab open nothing happens.
    pub(super) fn with_active_tab<T>(
        &mut self,
        op: impl FnOnce(&mut FileTab) -> Result<T>,
    ) -> Option<T> {
        let result = op(self.notebook.active_mut()?);
        self.report(result)
    }

    pub(super) fn with_active_widget<T>(
        &mut self,
        op: impl FnOnce(&mut ChangeDetector<TextArea>) -> Result<T>,
    ) -> Option<T> {
        self.with_active_tab(|tab| op(tab.widget()))
    }

    /// Tabs whose change detector fired since the last call.
    pub fn take_changed_tabs(&mut self) -> Vec<TabId> {
        let ids: Vec<_> = self.notebook.tabs().iter().map(FileTab::id).collect();
        ids.into_iter()
            .filter(|&id| self.notebook.tab_mut(id).is_some_and(FileTab::take_change))
            .collect()
    }

    /// `(line, col + 1)` of the active tab's cursor, as the status bar shows it.
    pub fn cursor_position(&self) -> Option<(usize, usize)> {
        let cursor = self.active_tab()?.text_area().insert_index();
        Some((cursor.line, cursor.col + 1))
    }

    /// Window title for the active tab.
    pub fn window_title(&self) -> String {
        let title = self.active_tab().map_or(UNTITLED, FileTab::title);
        format!("{title} - Codingg")
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub(super) fn set_clipboard(&mut self, text: String) {
        self.clipboard = Some(text);
        self.clipboard_unsent = true;
    }

    /// Newly copied text that still has to reach the terminal clipboard.
    pub(super) fn take_unsent_clipboard(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.clipboard_unsent) {
            return None;
        }
        self.clipboard.clone()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// Body size for a terminal: everything but the tab strip and status bar.
pub const fn body_size(terminal_size: (u16, u16)) -> (u16, u16) {
    (terminal_size.0, terminal_size.1.saturating_sub(2))
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            notebook: Notebook::new(NotebookStyle::default(), config.tab_options()),
            config,
            terminal_size: (80, 24),
            clipboard: None,
            clipboard_unsent: false,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            close_confirmed: None,
        }
    }
}
