//! Walk an annotated document and build its feedback record.

use chrono::{DateTime, Utc};

use crate::model::DiffDocument;
use crate::store::comments;

use super::{FeedbackComment, FeedbackRecord, DEFAULT_DIFF_COMMAND};

/// Build the feedback record for `doc`, stamped with the current time.
pub fn emit(doc: &DiffDocument) -> FeedbackRecord {
    emit_with(doc, Utc::now(), DEFAULT_DIFF_COMMAND)
}

/// Build the feedback record with an explicit timestamp and command label.
///
/// Comments appear in file order, then in line order within each file.
pub fn emit_with(
    doc: &DiffDocument,
    timestamp: DateTime<Utc>,
    diff_command: impl Into<String>,
) -> FeedbackRecord {
    let comments = comments(doc)
        .map(|(_, comment)| FeedbackComment {
            file: comment.file.clone(),
            line: comment.line_number,
            hunk: comment.hunk_header.clone(),
            content: comment.content.clone(),
            context: comment.context.clone(),
        })
        .collect();

    FeedbackRecord {
        timestamp,
        diff_command: diff_command.into(),
        comments,
    }
}
