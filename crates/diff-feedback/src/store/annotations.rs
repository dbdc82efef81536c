//! Comment mutations on a parsed document.
//!
//! These functions are the only way to change a [`DiffDocument`] after
//! parsing. They never touch line sequences, only the per-file comment maps.

use thiserror::Error;

use crate::model::{CommentRecord, DiffDocument, LinePosition};

/// Errors that can occur during comment operations.
///
/// All of them are recoverable; callers usually surface them as notices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    /// The submitted text was empty or whitespace. Treat as a cancel.
    #[error("Comment is empty")]
    EmptyContent,

    /// There is no comment at the position.
    #[error("No comment at {0}")]
    NotFound(LinePosition),

    /// The position does not address a line of the document.
    #[error("No diff line at {0}")]
    InvalidPosition(LinePosition),
}

/// Outcome of a successful [`upsert_comment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created,
    Replaced,
}

/// Attach `content` to the line at `position`, replacing any existing comment.
///
/// The comment's line number, hunk header and context are taken from the
/// target line. Hunk header lines are accepted here; keeping them out of reach
/// is up to the caller.
pub fn upsert_comment(
    doc: &mut DiffDocument,
    position: LinePosition,
    content: &str,
) -> Result<Upserted, AnnotationError> {
    if content.trim().is_empty() {
        return Err(AnnotationError::EmptyContent);
    }

    let file = doc
        .file_mut(position.file_index)
        .ok_or(AnnotationError::InvalidPosition(position))?;
    let line = file
        .line(position.position)
        .ok_or(AnnotationError::InvalidPosition(position))?;

    let comment = CommentRecord::for_line(line, content);
    let outcome = match file.insert_comment(position.position, comment) {
        Some(_) => Upserted::Replaced,
        None => Upserted::Created,
    };

    log::debug!("Comment {:?} at {}", outcome, position);
    Ok(outcome)
}

/// Remove the comment at `position` and return it.
pub fn remove_comment(
    doc: &mut DiffDocument,
    position: LinePosition,
) -> Result<CommentRecord, AnnotationError> {
    doc.file_mut(position.file_index)
        .and_then(|file| file.remove_comment(position.position))
        .ok_or(AnnotationError::NotFound(position))
}

/// Get the comment at `position`, if any.
pub fn get_comment(doc: &DiffDocument, position: LinePosition) -> Option<&CommentRecord> {
    doc.file(position.file_index)?.comment(position.position)
}

/// All comments in document order (files first, then position within file).
pub fn comments(doc: &DiffDocument) -> impl Iterator<Item = (LinePosition, &CommentRecord)> {
    doc.files()
        .iter()
        .enumerate()
        .flat_map(|(file_index, file)| {
            file.comments()
                .map(move |(pos, comment)| (LinePosition::new(file_index, pos), comment))
        })
}
