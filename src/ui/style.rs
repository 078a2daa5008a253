//! Theming and color definitions.
//!
//! Colors follow the One Dark palette. [`NotebookStyle`] is built once and
//! handed to [`Notebook::new`](crate::tabs::Notebook::new).

use ratatui::style::{Color, Modifier, Style};

/// Presentation settings for the tab strip, text areas and status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookStyle {
    /// Drawn after each tab title; clicking it closes the tab.
    pub close_glyph: String,
    /// Drawn before the title of a modified tab.
    pub modified_glyph: String,
    pub background: Color,
    pub foreground: Color,
    pub gutter: Color,
    pub cursor: Color,
    pub selection: Color,
    pub tab_selected: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for NotebookStyle {
    fn default() -> Self {
        Self {
            close_glyph: "×".to_string(),
            modified_glyph: "●".to_string(),
            background: Color::Rgb(0x28, 0x2c, 0x34),
            foreground: Color::Rgb(0xab, 0xb2, 0xbf),
            gutter: Color::Rgb(0x4b, 0x53, 0x64),
            cursor: Color::Rgb(0x52, 0x8b, 0xff),
            selection: Color::Rgb(0x3e, 0x44, 0x51),
            tab_selected: Color::Green,
            status_bg: Color::Rgb(0x21, 0x25, 0x2b),
            status_fg: Color::Rgb(0x9d, 0xa5, 0xb4),
        }
    }
}

impl NotebookStyle {
    pub fn text(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn gutter(&self) -> Style {
        Style::default().bg(self.background).fg(self.gutter)
    }

    pub fn cursor(&self) -> Style {
        Style::default().bg(self.cursor).fg(self.background)
    }

    pub fn selected_text(&self) -> Style {
        self.text().bg(self.selection)
    }

    pub fn tab(&self, active: bool) -> Style {
        if active {
            Style::default()
                .bg(self.tab_selected)
                .fg(self.background)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.background).fg(self.foreground)
        }
    }

    pub fn status(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}
