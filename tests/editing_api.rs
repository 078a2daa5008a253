//! The editing API used from outside the crate: a text area behind a change
//! detector, a gutter kept in sync with it, and the tab container.

use codingg::editor::{ChangeDetector, Index, Motion, TextArea, TextIndex, TextWidget, WrapMode};
use codingg::gutter::{GutterMode, LineGutter};
use codingg::tabs::{Notebook, TabOptions};
use codingg::ui::style::NotebookStyle;

fn detector(text: &str) -> ChangeDetector<TextArea> {
    let mut area = TextArea::new(text, WrapMode::Word, 4);
    area.set_area(20, 5);
    ChangeDetector::new(area)
}

#[test]
fn test_edits_raise_one_change_and_queries_none() {
    let mut widget = detector("alpha\nbeta");

    widget.index(Index::End).unwrap();
    widget.get(Index::pos(1, 0), None).unwrap();
    widget.yview().unwrap();
    assert!(!widget.take_change());

    widget.type_char('x').unwrap();
    assert!(widget.take_change());
    assert!(!widget.take_change());

    widget.move_cursor(Motion::Down).unwrap();
    assert!(widget.take_change());
    assert_eq!(widget.cursor().unwrap(), TextIndex::new(2, 1));
}

#[test]
fn test_copy_with_nothing_selected_is_quiet() {
    let mut widget = detector("alpha");
    assert_eq!(widget.copy().unwrap(), None);
    assert!(!widget.take_change());
}

#[test]
fn test_index_expressions_parse_and_resolve() {
    let mut widget = detector("one\ntwo\nthree");
    let index: Index = "insert +1lines lineend".parse().unwrap();
    assert_eq!(widget.index(index).unwrap(), TextIndex::new(2, 3));
    assert_eq!(widget.index(Index::End).unwrap(), TextIndex::new(4, 0));
    assert_eq!(widget.line_count().unwrap(), 3);
    assert!("nonsense".parse::<Index>().is_err());
}

#[test]
fn test_viewport_gutter_follows_scrolling() {
    let text = (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
    let mut widget = detector(&text);
    let mut gutter = LineGutter::new(GutterMode::Viewport);
    gutter.on_configure(&mut widget).unwrap();
    assert_eq!(gutter.labels().first().map(|(_, l)| l.as_str()), Some("1"));

    widget.yview_scroll(5, codingg::editor::ScrollUnit::Units).unwrap();
    assert!(widget.take_change());
    gutter.on_change(&mut widget).unwrap();

    let labels: Vec<_> = gutter.labels().iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(labels, ["6", "7", "8", "9", "10"]);
    assert_eq!(gutter.width(), 3);
}

#[test]
fn test_notebook_opens_files_as_tabs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("three.txt");
    std::fs::write(&path, "line1\nline2\nline3").unwrap();

    let mut notebook = Notebook::new(NotebookStyle::default(), TabOptions::default());
    notebook.set_body(30, 10).unwrap();
    let id = notebook.open_file(&path).unwrap();

    let tab = notebook.active().unwrap();
    assert_eq!(tab.id(), id);
    assert_eq!(tab.title(), "three.txt");
    assert_eq!(tab.text_area().buffer().line_count(), 3);
    assert_eq!(tab.text_area().insert_index(), TextIndex::START);

    assert!(notebook.open_file(&dir.path().join("absent.txt")).is_err());
    assert_eq!(notebook.len(), 1);
}
