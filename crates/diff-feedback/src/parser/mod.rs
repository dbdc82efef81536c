//! Unified diff parsing.

mod classifier;
mod unified;

use thiserror::Error;

pub use classifier::{
    classify_line, parse_hunk_header, HunkRange, LineClass, LineCounters, FILE_SEPARATOR,
    HUNK_MARKER, NEW_FILE_MARKER,
};
pub use unified::{parse_for_review, parse_unified_diff};

/// Errors that can occur during diff parsing.
///
/// Neither is fatal: [`parse_unified_diff`] recovers from malformed hunk
/// headers on its own, and an empty document just means there is nothing to
/// review.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed hunk header: {0}")]
    MalformedHunkHeader(String),
    #[error("No file sections found in diff")]
    EmptyDocument,
}
