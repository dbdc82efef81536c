//! Data models for diff representation.

mod comment;
mod diff;

pub use comment::{CommentRecord, LinePosition};
pub use diff::{DiffDocument, DiffLineRecord, FileEntry, LineKind};
