//! The text widget and everything it is built from.
//!
//! [`TextArea`] is a rope-backed, soft-wrapping text area driven entirely by
//! [`Command`]s. [`ChangeDetector`] wraps any [`TextWidget`] and reports when
//! content, cursor or view moved, for the TEA loop to react to.

mod buffer;
mod detector;
mod index;
mod layout;
mod text_area;
mod widget;

pub use buffer::EditorBuffer;
pub use detector::{ChangeDetector, triggers_change};
pub use index::{Index, Mark, TextIndex};
pub use layout::{DisplayRow, Layout, WrapMode, char_cells, col_at_x, wrap_line, x_of_col};
pub use text_area::TextArea;
pub use widget::{
    Command, CommandKind, DLineInfo, Motion, Reply, ScrollUnit, Tag, TextWidget, ViewCommand,
};
