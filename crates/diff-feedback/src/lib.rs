//! # diff-feedback
//!
//! Turns unified diff text into a navigable file/line model, lets a reviewer
//! attach comments to individual lines, and emits the comments as a JSON
//! feedback record.
//!
//! ## Design Principles
//!
//! The crate performs no I/O of its own apart from writing the record on
//! request. Obtaining the diff text and driving the review (which line is
//! focused, what the reviewer typed) belong to the caller, which talks to the
//! crate through a small surface:
//!
//! - [`parse_unified_diff`] builds a [`DiffDocument`]
//! - [`upsert_comment`], [`remove_comment`] and [`get_comment`] manage comments
//! - [`emit`] produces the [`FeedbackRecord`]
//!
//! Comments are keyed by [`LinePosition`] (file index and index of the line in
//! that file), never by displayed line number or line content.
//!
//! ## Usage
//!
//! ```
//! use diff_feedback::{emit, parse_unified_diff, upsert_comment, LinePosition};
//!
//! let text = "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-old\n+new\n";
//! let mut doc = parse_unified_diff(text);
//!
//! upsert_comment(&mut doc, LinePosition::new(0, 2), "prefer the old name")?;
//!
//! let record = emit(&doc);
//! assert_eq!(record.comments[0].line, Some(1));
//! # Ok::<(), diff_feedback::AnnotationError>(())
//! ```

pub mod feedback;
pub mod model;
pub mod parser;
pub mod store;

// Re-export commonly used types
pub use feedback::{
    emit, emit_with, FeedbackComment, FeedbackError, FeedbackRecord, DEFAULT_DIFF_COMMAND,
};
pub use model::{CommentRecord, DiffDocument, DiffLineRecord, FileEntry, LineKind, LinePosition};
pub use parser::{parse_for_review, parse_unified_diff, ParseError};
pub use store::{
    comments, get_comment, remove_comment, upsert_comment, AnnotationError, LineIndex, Upserted,
};
