// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. gutter::GutterMode)
    clippy::module_name_repetitions
)]

//! # Codingg
//!
//! A multi-tab text editor for the terminal.
//!
//! Each tab holds a soft-wrapping text area with:
//! - A line-number gutter that stays in sync with edits and scrolling
//! - A vertical scrollbar
//! - Undo/redo, selection and clipboard support
//!
//! ## Architecture
//!
//! Codingg uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! Text areas sit behind a [`editor::ChangeDetector`]. After every message
//! the app collects the tabs whose detector fired and sends each one a
//! single `TextChanged`, which is where gutters get refreshed.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop, state and input mapping
//! - [`editor`]: Text buffer, index expressions, layout and the change detector
//! - [`gutter`]: Line-number gutter synchronization
//! - [`tabs`]: File tabs and the tab container
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults
//! - [`perf`]: Timing scopes and the debug event log

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod gutter;
pub mod perf;
pub mod tabs;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{ChangeDetector, Index, TextArea, TextIndex, TextWidget};
    pub use crate::tabs::Notebook;
}
