//! Feedback record: the serialized outcome of a review session.

mod emitter;

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use emitter::{emit, emit_with};

/// Label of the diff command the reviewed text comes from.
pub const DEFAULT_DIFF_COMMAND: &str = "git diff HEAD";

/// Errors that can occur while writing a feedback record.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Failed to write feedback: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize feedback: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// All comments of a session, in diff order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// When the record was emitted (UTC).
    pub timestamp: DateTime<Utc>,
    /// Command the diff text was obtained with.
    pub diff_command: String,
    pub comments: Vec<FeedbackComment>,
}

/// One flat comment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackComment {
    pub file: String,
    /// `null` when the annotated line has no line number (hunk headers).
    pub line: Option<u32>,
    pub hunk: String,
    pub content: String,
    pub context: String,
}

impl FeedbackRecord {
    /// Serialize as pretty-printed JSON into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), FeedbackError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, FeedbackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the record to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), FeedbackError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))?;

        log::info!(
            "Saved {} comments to {}",
            self.comments.len(),
            path.display()
        );
        Ok(())
    }
}
