//! Comment-related data structures for diff reviews.

use std::fmt;

use super::diff::DiffLineRecord;

/// A reviewer annotation attached to one diff line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// File path.
    pub file: String,
    /// Line number as the reviewer sees it (new line, else old line).
    pub line_number: Option<u32>,
    /// Hunk header of the annotated line.
    pub hunk_header: String,
    /// Comment body (never empty).
    pub content: String,
    /// Verbatim content of the annotated line.
    pub context: String,
}

impl CommentRecord {
    /// Create a comment anchored on `line`.
    pub fn for_line(line: &DiffLineRecord, content: impl Into<String>) -> Self {
        Self {
            file: line.file_path.clone(),
            line_number: line.display_line_number(),
            hunk_header: line.hunk_header.clone(),
            content: content.into(),
            context: line.content.clone(),
        }
    }
}

/// Where a comment is anchored: a file and a line's index inside that file.
///
/// This is the sequence position, not a displayed line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinePosition {
    /// Index of the file in the document.
    pub file_index: usize,
    /// Zero-based index of the line inside the file.
    pub position: usize,
}

impl LinePosition {
    pub fn new(file_index: usize, position: usize) -> Self {
        Self {
            file_index,
            position,
        }
    }
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {} line {}", self.file_index, self.position)
    }
}
