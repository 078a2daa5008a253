//! Change detection around a text widget.
//!
//! [`ChangeDetector`] forwards every command to the wrapped widget and
//! remembers when one of them altered content, cursor or scroll position.
//! The event loop drains that flag once per dispatched action with
//! [`ChangeDetector::take_change`], so an action that issues several
//! primitives still produces a single change notification.

use crate::error::Result;

use super::index::Mark;
use super::widget::{Command, Reply, TextWidget, ViewCommand};

/// Whether a successful command counts as a change.
///
/// Content edits, moving the insert mark and any view adjustment qualify;
/// queries and tag or anchor updates do not.
pub const fn triggers_change(command: &Command) -> bool {
    match command {
        Command::Insert { .. } | Command::Delete { .. } | Command::Replace { .. } => true,
        Command::MarkSet { mark, .. } => matches!(mark, Mark::Insert),
        Command::XView(view) | Command::YView(view) => !matches!(view, ViewCommand::Query),
        _ => false,
    }
}

/// A text widget decorator that records content and view changes.
#[derive(Debug)]
pub struct ChangeDetector<W> {
    inner: W,
    pending: bool,
}

impl<W: TextWidget> ChangeDetector<W> {
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            pending: false,
        }
    }

    pub const fn inner(&self) -> &W {
        &self.inner
    }

    /// Direct access to the wrapped widget. Commands issued through it are
    /// not observed.
    pub const fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub const fn has_pending_change(&self) -> bool {
        self.pending
    }

    /// Return and clear the pending change flag.
    pub const fn take_change(&mut self) -> bool {
        let pending = self.pending;
        self.pending = false;
        pending
    }
}

impl<W: TextWidget> TextWidget for ChangeDetector<W> {
    fn execute(&mut self, command: Command) -> Result<Reply> {
        let triggers = triggers_change(&command);
        let kind = command.kind();
        match self.inner.execute(command) {
            Ok(reply) => {
                if triggers {
                    self.pending = true;
                }
                Ok(reply)
            }
            Err(err) if err.is_benign() => {
                tracing::trace!(command = kind.name(), %err, "ignored");
                Ok(Reply::Unit)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::index::{Index, TextIndex};
    use crate::editor::layout::WrapMode;
    use crate::editor::text_area::TextArea;
    use crate::editor::widget::{Motion, ScrollUnit, Tag};
    use crate::error::EditorError;

    fn detector(text: &str) -> ChangeDetector<TextArea> {
        let mut area = TextArea::new(text, WrapMode::Word, 4);
        area.set_area(20, 5);
        ChangeDetector::new(area)
    }

    fn long_text() -> String {
        (1..=50).map(|n| n.to_string()).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_edit_raises_change() {
        let mut w = detector("abc");
        w.insert(Index::End, "d").unwrap();
        assert!(w.take_change());
        assert!(!w.take_change());
    }

    #[test]
    fn test_queries_never_raise() {
        let mut w = detector(&long_text());
        w.index(Index::at(0, 0)).unwrap();
        w.get(Index::pos(1, 0), Some(Index::End)).unwrap();
        w.dline_info(Index::pos(1, 0)).unwrap();
        w.yview().unwrap();
        w.xview().unwrap();
        w.selection().unwrap();
        w.is_modified().unwrap();
        assert!(!w.has_pending_change());
    }

    #[test]
    fn test_anchor_and_tag_changes_do_not_raise() {
        let mut w = detector("abc");
        w.mark_set(Mark::Anchor, Index::pos(1, 1)).unwrap();
        w.select_all().unwrap();
        w.clear_selection().unwrap();
        w.see(Index::End).unwrap();
        assert!(!w.has_pending_change());
    }

    #[test]
    fn test_cursor_move_and_scroll_raise() {
        let mut w = detector(&long_text());
        w.mark_set(Mark::Insert, Index::pos(2, 0)).unwrap();
        assert!(w.take_change());
        w.yview_scroll(3, ScrollUnit::Units).unwrap();
        assert!(w.take_change());
        w.yview_moveto(0.5).unwrap();
        assert!(w.take_change());
        w.xview_moveto(0.0).unwrap();
        assert!(w.take_change());
    }

    #[test]
    fn test_noop_edit_still_raises() {
        let mut w = detector("abc");
        w.backspace().unwrap();
        assert!(w.take_change());
        assert_eq!(w.inner().text(), "abc");
    }

    #[test]
    fn test_multi_step_action_coalesces_to_one_change() {
        let mut w = detector("hello world");
        w.select_all().unwrap();
        w.type_text("x").unwrap();
        assert!(w.take_change());
        assert!(!w.take_change());
        assert_eq!(w.inner().text(), "x");
    }

    #[test]
    fn test_copy_without_selection_is_swallowed() {
        let mut w = detector("abc");
        assert_eq!(w.copy().unwrap(), None);
        assert_eq!(w.cut().unwrap(), None);
        assert!(!w.has_pending_change());
        assert_eq!(w.inner().text(), "abc");
    }

    #[test]
    fn test_other_failures_propagate() {
        let mut w = ChangeDetector::new(TextArea::new("abc", WrapMode::Word, 4));
        assert!(matches!(
            w.index(Index::at(0, 0)),
            Err(EditorError::GeometryUnavailable)
        ));
    }

    #[test]
    fn test_failed_edit_does_not_raise() {
        let mut w = detector("abc");
        let result = w.execute(Command::Delete {
            start: Index::SelFirst,
            end: Some(Index::SelLast),
        });
        assert_eq!(result.unwrap(), Reply::Unit);
        assert!(!w.has_pending_change());
    }

    #[test]
    fn test_selection_tags_round_trip_through_detector() {
        let mut w = detector("abc");
        w.execute(Command::TagAdd {
            tag: Tag::Sel,
            start: Index::pos(1, 0),
            end: Index::pos(1, 2),
        })
        .unwrap();
        assert_eq!(
            w.selection().unwrap(),
            Some((TextIndex::new(1, 0), TextIndex::new(1, 2)))
        );
        assert_eq!(w.copy().unwrap().as_deref(), Some("ab"));
    }

    #[test]
    fn test_undo_raises_change() {
        let mut w = detector("abc");
        w.type_char('x').unwrap();
        w.take_change();
        w.undo().unwrap();
        assert!(w.take_change());
        w.move_cursor(Motion::Right).unwrap();
        assert!(w.take_change());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn edit_strategy() -> impl Strategy<Value = Command> {
            prop_oneof![
                (1..6usize, 0..8usize, "[a-z\n]{0,4}").prop_map(|(l, c, text)| Command::Insert {
                    index: Index::pos(l, c),
                    text,
                }),
                (1..6usize, 0..8usize, 1..6usize, 0..8usize).prop_map(|(l1, c1, l2, c2)| {
                    Command::Delete {
                        start: Index::pos(l1, c1),
                        end: Some(Index::pos(l2, c2)),
                    }
                }),
                (1..6usize, 0..8usize, "[a-z]{0,3}").prop_map(|(l, c, text)| Command::Replace {
                    start: Index::pos(l, c),
                    end: Index::pos(l, c).chars(2),
                    text,
                }),
                (1..6usize, 0..8usize).prop_map(|(l, c)| Command::MarkSet {
                    mark: Mark::Insert,
                    index: Index::pos(l, c),
                }),
                (-5..5isize).prop_map(|n| Command::YView(ViewCommand::Scroll(n, ScrollUnit::Units))),
            ]
        }

        fn query_strategy() -> impl Strategy<Value = Command> {
            prop_oneof![
                (1..6usize, 0..8usize).prop_map(|(l, c)| Command::Index(Index::pos(l, c))),
                (0..20u16, 0..5u16).prop_map(|(x, y)| Command::Index(Index::at(x, y))),
                (1..6usize, 0..8usize).prop_map(|(l, c)| Command::Get {
                    start: Index::pos(l, c),
                    end: Some(Index::End),
                }),
                (1..6usize).prop_map(|l| Command::DLineInfo(Index::pos(l, 0))),
                Just(Command::YView(ViewCommand::Query)),
                Just(Command::XView(ViewCommand::Query)),
                Just(Command::TagRanges(Tag::Sel)),
                Just(Command::EditModified(None)),
            ]
        }

        proptest! {
            #[test]
            fn every_successful_edit_raises(cmd in edit_strategy(), text in "[a-z\n]{0,20}") {
                let mut w = detector(&text);
                let ok = w.execute(cmd).is_ok();
                prop_assert!(ok);
                prop_assert!(w.take_change());
            }

            #[test]
            fn queries_are_silent(cmds in proptest::collection::vec(query_strategy(), 1..20), text in "[a-z\n]{0,40}") {
                let mut w = detector(&text);
                for cmd in cmds {
                    w.execute(cmd).unwrap();
                }
                prop_assert!(!w.has_pending_change());
            }
        }
    }
}
