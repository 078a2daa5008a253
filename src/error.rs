//! Error types shared by the editor, gutter and tab container.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by text widgets and the components layered on them.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A selection operation was issued while nothing is selected.
    ///
    /// This is the normal outcome of forwarding every copy/cut request, so
    /// the change detector swallows it.
    #[error("text doesn't contain any characters tagged with \"sel\"")]
    NoSelection,

    /// Display geometry was requested before the widget was laid out.
    #[error("display geometry is not available yet")]
    GeometryUnavailable,

    /// An index expression could not be parsed.
    #[error("bad text index \"{0}\"")]
    InvalidIndex(String),

    /// A provided method got a reply of the wrong shape from `execute`.
    #[error("unexpected reply to {0} command")]
    UnexpectedReply(&'static str),

    /// Opening a file into a tab failed.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a tab back to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditorError {
    /// Whether this failure is an expected consequence of forwarding an
    /// operation unconditionally.
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::NoSelection)
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_no_selection_is_benign() {
        assert!(EditorError::NoSelection.is_benign());
        assert!(!EditorError::GeometryUnavailable.is_benign());
        assert!(!EditorError::InvalidIndex("x".into()).is_benign());
    }

    #[test]
    fn test_file_read_message_names_path() {
        let err = EditorError::FileRead {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read missing.txt: not found");
    }
}
