use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::editor::{DisplayRow, TextIndex, char_cells};
use crate::tabs::FileTab;

use super::style::NotebookStyle;
use super::{ScreenAreas, status, tab_label};

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let areas = ScreenAreas::for_notebook(area, &model.notebook);
    let style = model.notebook.style().clone();

    frame.render_widget(Paragraph::new("").style(style.text()), area);
    render_tab_strip(model, &style, frame, areas.tabs);
    match model.notebook.active_mut() {
        Some(tab) => {
            render_gutter(tab, &style, frame, areas.gutter);
            render_text(tab, &style, frame, areas.text);
            render_scrollbar(tab, &style, frame, areas.scrollbar);
        }
        None => {
            let hint = Paragraph::new(" No open tabs. Ctrl+N: new tab  Ctrl+Q: quit")
                .style(style.gutter());
            frame.render_widget(hint, areas.text);
        }
    }

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, areas.toast);
    }
    status::render_status_bar(model, &style, frame, areas.status);
}

fn render_tab_strip(model: &Model, style: &NotebookStyle, frame: &mut Frame, area: Rect) {
    let active = model.notebook.active_index();
    let mut spans = Vec::new();
    for (index, tab) in model.notebook.tabs().iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" ", style.text()));
        }
        spans.push(Span::styled(
            tab_label(tab, &model.notebook),
            style.tab(active == Some(index)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(style.text()), area);
}

fn render_gutter(tab: &mut FileTab, style: &NotebookStyle, frame: &mut Frame, area: Rect) {
    if area.width == 0 {
        return;
    }
    let top_line = tab
        .text_area_mut()
        .visible_rows()
        .first()
        .map_or(1, |row| row.line);
    let digits = usize::from(area.width.saturating_sub(1));
    let lines: Vec<Line> = tab
        .gutter()
        .row_labels(area.height, top_line)
        .into_iter()
        .map(|label| Line::from(format!("{:>digits$} ", label.unwrap_or(""))))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(style.gutter()), area);
}

fn render_text(tab: &mut FileTab, style: &NotebookStyle, frame: &mut Frame, area: Rect) {
    let text_area = tab.text_area_mut();
    let rows = text_area.visible_rows();
    let selection = text_area.selection_range();
    let tab_size = text_area.tab_size();
    let hscroll = text_area.horizontal_scroll();

    let mut lines = Vec::with_capacity(rows.len());
    let mut chars: (usize, Vec<char>) = (0, Vec::new());
    for row in rows {
        if chars.0 != row.line {
            chars = (row.line, text_area.line_chars(row.line));
        }
        lines.push(row_line(&chars.1, row, selection, style, tab_size, hscroll));
    }
    frame.render_widget(Paragraph::new(lines).style(style.text()), area);

    if let Some((x, y)) = text_area.cursor_cell()
        && x < area.width
        && y < area.height
    {
        let position = Position::new(area.x + x, area.y + y);
        frame.set_cursor_position(position);
        if let Some(cell) = frame.buffer_mut().cell_mut(position) {
            cell.set_style(style.cursor());
        }
    }
}

/// Spans for one display row, with tabs expanded and the first `hscroll`
/// cells cut off.
fn row_line(
    chars: &[char],
    row: DisplayRow,
    selection: Option<(TextIndex, TextIndex)>,
    style: &NotebookStyle,
    tab_size: usize,
    hscroll: usize,
) -> Line<'static> {
    let selected = |col: usize| {
        let idx = TextIndex::new(row.line, col);
        selection.is_some_and(|(first, last)| first <= idx && idx < last)
    };
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut push = |text: String, span_style: Style| match spans.last_mut() {
        Some(last) if last.style == span_style => last.content.to_mut().push_str(&text),
        _ => spans.push(Span::styled(text, span_style)),
    };

    let mut x = 0;
    for col in row.start..row.end.min(chars.len()) {
        let c = chars[col];
        let start = x;
        x += char_cells(c, x, tab_size);
        if x <= hscroll {
            continue;
        }
        let text = if c == '\t' || start < hscroll {
            " ".repeat(x - start.max(hscroll))
        } else {
            c.to_string()
        };
        let span_style = if selected(col) {
            style.selected_text()
        } else {
            style.text()
        };
        push(text, span_style);
    }
    // A selected line break shows as one highlighted cell.
    if row.end == chars.len() && selected(chars.len()) && x >= hscroll {
        push(" ".to_string(), style.selected_text());
    }
    Line::from(spans)
}

fn render_scrollbar(tab: &FileTab, style: &NotebookStyle, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (first, last) = tab.scrollbar();
    let height = f64::from(area.height);
    // Truncation to whole rows is intended.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (thumb_start, thumb_end) = (
        (first * height).floor() as u16,
        ((last * height).ceil() as u16).max((first * height).floor() as u16 + 1),
    );
    let lines: Vec<Line> = (0..area.height)
        .map(|row| {
            if (thumb_start..thumb_end).contains(&row) {
                Line::styled("█", style.gutter())
            } else {
                Line::styled("│", style.gutter())
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
