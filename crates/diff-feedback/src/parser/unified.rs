//! Parse unified diff text (as produced by `git diff <ref>`).

use crate::model::{DiffDocument, DiffLineRecord, FileEntry};

use super::classifier::{classify_line, LineClass, LineCounters};
use super::ParseError;

/// Running parser state, folded over the lines of the diff.
#[derive(Debug, Default)]
struct ParseState {
    files: Vec<FileEntry>,
    current: Option<FileEntry>,
    hunk_header: String,
    counters: LineCounters,
}

impl ParseState {
    fn step(mut self, line: &str) -> Self {
        let (class, counters) = classify_line(line, self.current.is_some(), self.counters);
        self.counters = counters;

        match class {
            LineClass::FileBoundary => self.close_file(),
            LineClass::NewFile { path } => {
                self.close_file();
                self.current = Some(FileEntry::new(path));
            }
            LineClass::HunkHeader { text, .. } => {
                self.hunk_header = text.to_string();
                if let Some(file) = self.current.as_mut() {
                    let record = DiffLineRecord::hunk_header(text, file.path.as_str());
                    file.push_line(record);
                }
            }
            LineClass::Context {
                content,
                old_line,
                new_line,
            } => self.push(|path, hunk| {
                DiffLineRecord::context(content, old_line, new_line, path, hunk)
            }),
            LineClass::Added { content, new_line } => {
                self.push(|path, hunk| DiffLineRecord::added(content, new_line, path, hunk))
            }
            LineClass::Removed { content, old_line } => {
                self.push(|path, hunk| DiffLineRecord::removed(content, old_line, path, hunk))
            }
            LineClass::Skipped => {}
        }

        self
    }

    fn push(&mut self, build: impl FnOnce(&str, &str) -> DiffLineRecord) {
        if let Some(file) = self.current.as_mut() {
            let record = build(&file.path, &self.hunk_header);
            file.push_line(record);
        }
    }

    fn close_file(&mut self) {
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
    }

    fn finish(mut self) -> DiffDocument {
        self.close_file();
        DiffDocument::new(self.files)
    }
}

/// Parse a unified diff string into a structured [`DiffDocument`].
///
/// Never fails: lines that do not belong to a recognized file section are
/// skipped, and a malformed hunk header only fails to reset the line counters.
///
/// # Example
/// ```
/// let doc = diff_feedback::parse_unified_diff("+++ b/x\n@@ -1 +1 @@\n+hi\n");
/// assert_eq!(doc.files()[0].path, "x");
/// ```
pub fn parse_unified_diff(diff_text: &str) -> DiffDocument {
    let doc = diff_text
        .lines()
        .fold(ParseState::default(), ParseState::step)
        .finish();

    log::debug!(
        "Parsed diff: {} files, {} lines (+{} -{})",
        doc.files().len(),
        doc.total_lines(),
        doc.total_additions(),
        doc.total_deletions()
    );

    doc
}

/// Parse a diff and reject it when there is nothing to review.
pub fn parse_for_review(diff_text: &str) -> Result<DiffDocument, ParseError> {
    let doc = parse_unified_diff(diff_text);
    if doc.is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    Ok(doc)
}
