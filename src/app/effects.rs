use std::io::{Write, stdout};

use base64::Engine;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use tracing::debug;

use crate::app::{App, Message, Model, ToastLevel};
use crate::tabs::FileTab;

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => save_active_tab(model),
            Message::Copy | Message::Cut => {
                if let Some(text) = model.take_unsent_clipboard()
                    && let Err(err) = copy_to_clipboard_osc52(&text)
                {
                    model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
                }
            }
            _ => {}
        }
    }

    /// Set the terminal title when the active tab's title changed.
    pub(super) fn sync_window_title(model: &Model, shown: &mut String) -> std::io::Result<()> {
        let title = model.window_title();
        if *shown != title {
            execute!(stdout(), SetTitle(&title))?;
            *shown = title;
        }
        Ok(())
    }
}

pub(super) fn save_active_tab(model: &mut Model) {
    let title = model.active_tab().map(|tab| tab.title().to_string());
    match model.with_active_tab(FileTab::save) {
        Some(Some(path)) => {
            crate::perf::log_event("save", format!("path={}", path.display()));
            model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
        }
        Some(None) => {
            debug!(?title, "save skipped: tab has no path");
            model.show_toast(
                ToastLevel::Error,
                format!("Cannot save \"{}\": it has no file", title.unwrap_or_default()),
            );
        }
        // No tab, or the write failed and was already reported.
        None => {}
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::osc52_sequence;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        let seq = osc52_sequence("hi");
        assert_eq!(seq, "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_sequence_encodes_multibyte_text() {
        let seq = osc52_sequence("×\n");
        assert_eq!(seq, "\x1b]52;c;w5cK\x07");
    }
}
