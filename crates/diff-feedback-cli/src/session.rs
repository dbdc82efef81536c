//! Review session: owns the parsed diff and applies reviewer actions to it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use diff_feedback::{
    comments, emit_with, get_comment, remove_comment, upsert_comment, AnnotationError,
    DiffDocument, DiffLineRecord, FeedbackRecord, LineIndex, LinePosition, Upserted,
};

use crate::action::{ReviewAction, HELP};

/// Whether the session continues after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A single review of one diff.
pub struct ReviewSession {
    doc: DiffDocument,
    index: LineIndex,
    diff_command: String,
    output_path: PathBuf,
}

impl ReviewSession {
    pub fn new(
        doc: DiffDocument,
        diff_command: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        let index = LineIndex::new(&doc);
        Self {
            doc,
            index,
            diff_command: diff_command.into(),
            output_path: output_path.into(),
        }
    }

    #[cfg(test)]
    pub fn document(&self) -> &DiffDocument {
        &self.doc
    }

    /// Read actions from `input` until `quit` or end of input, then save.
    ///
    /// Unreadable input never loses the review: a line that is not UTF-8 is
    /// skipped with a notice, and a read failure ends the loop before saving.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<FeedbackRecord> {
        writeln!(
            out,
            "Reviewing {} files, {} lines. Type 'help' for commands.",
            self.doc.files().len(),
            self.index.len()
        )?;

        for bytes in input.split(b'\n') {
            let bytes = match bytes {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::error!("Failed to read command: {}", e);
                    writeln!(out, "Failed to read input ({}), saving and exiting", e)?;
                    break;
                }
            };
            let Ok(line) = String::from_utf8(bytes) else {
                log::warn!("Ignoring input line that is not valid UTF-8");
                writeln!(out, "Input is not valid UTF-8, line ignored")?;
                continue;
            };

            let action = match ReviewAction::parse(&line) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{:#}", e)?;
                    continue;
                }
            };

            if self.handle_action(action, out)? == Flow::Quit {
                break;
            }
        }

        let record = self.save()?;
        writeln!(
            out,
            "Feedback saved to {} ({} comments)",
            self.output_path.display(),
            record.comments.len()
        )?;
        Ok(record)
    }

    /// Apply one action, printing its outcome to `out`.
    pub fn handle_action<W: Write>(&mut self, action: ReviewAction, out: &mut W) -> Result<Flow> {
        log::debug!("Handling {:?}", action);

        match action {
            ReviewAction::List => self.print_all(out)?,
            ReviewAction::Show(global) => self.show(global, out)?,
            ReviewAction::Comment { line, text } => self.comment(line, &text, out)?,
            ReviewAction::Edit { line, text } => self.edit(line, &text, out)?,
            ReviewAction::Delete(global) => self.delete(global, out)?,
            ReviewAction::Comments => self.print_comments(out)?,
            ReviewAction::Write => {
                let record = self.save()?;
                writeln!(
                    out,
                    "Feedback saved to {} ({} comments)",
                    self.output_path.display(),
                    record.comments.len()
                )?;
            }
            ReviewAction::Quit => return Ok(Flow::Quit),
            ReviewAction::Help => writeln!(out, "{}", HELP)?,
        }

        Ok(Flow::Continue)
    }

    /// Emit the feedback record and write it to the output path.
    pub fn save(&self) -> Result<FeedbackRecord> {
        let record = emit_with(&self.doc, Utc::now(), self.diff_command.as_str());
        record
            .save(&self.output_path)
            .with_context(|| format!("Failed to save feedback to {:?}", self.output_path))?;
        Ok(record)
    }

    fn show<W: Write>(&self, global: usize, out: &mut W) -> Result<()> {
        let Some((pos, line)) = self.line_at(global) else {
            writeln!(out, "{}", self.missing_line(global))?;
            return Ok(());
        };

        print_line(out, global, line)?;
        if let Some(comment) = get_comment(&self.doc, pos) {
            writeln!(out, "      → [Comment] {}", comment.content)?;
        }
        Ok(())
    }

    fn comment<W: Write>(&mut self, global: usize, text: &str, out: &mut W) -> Result<()> {
        let pos = match self.commentable(global) {
            Ok(pos) => pos,
            Err(notice) => {
                writeln!(out, "{}", notice)?;
                return Ok(());
            }
        };

        match upsert_comment(&mut self.doc, pos, text.trim()) {
            Ok(Upserted::Created) => writeln!(out, "Comment added")?,
            Ok(Upserted::Replaced) => writeln!(out, "Comment updated")?,
            Err(AnnotationError::EmptyContent) => writeln!(out, "Empty comment, nothing changed")?,
            Err(e) => writeln!(out, "{}", e)?,
        }
        Ok(())
    }

    fn edit<W: Write>(&mut self, global: usize, text: &str, out: &mut W) -> Result<()> {
        let pos = match self.commentable(global) {
            Ok(pos) => pos,
            Err(notice) => {
                writeln!(out, "{}", notice)?;
                return Ok(());
            }
        };

        if get_comment(&self.doc, pos).is_none() {
            writeln!(out, "No comment to edit on this line")?;
            return Ok(());
        }
        self.comment(global, text, out)
    }

    fn delete<W: Write>(&mut self, global: usize, out: &mut W) -> Result<()> {
        let pos = match self.commentable(global) {
            Ok(pos) => pos,
            Err(notice) => {
                writeln!(out, "{}", notice)?;
                return Ok(());
            }
        };

        match remove_comment(&mut self.doc, pos) {
            Ok(_) => writeln!(out, "Comment deleted")?,
            Err(AnnotationError::NotFound(_)) => writeln!(out, "No comment to delete on this line")?,
            Err(e) => writeln!(out, "{}", e)?,
        }
        Ok(())
    }

    fn line_at(&self, global: usize) -> Option<(LinePosition, &DiffLineRecord)> {
        let pos = self.index.resolve(global)?;
        let line = self.doc.file(pos.file_index)?.line(pos.position)?;
        Some((pos, line))
    }

    fn missing_line(&self, global: usize) -> String {
        format!("No line {} (the diff has {} lines)", global, self.index.len())
    }

    /// Resolve a global index to a line that may carry a comment, or a notice explaining why not.
    fn commentable(&self, global: usize) -> Result<LinePosition, String> {
        let (pos, line) = self
            .line_at(global)
            .ok_or_else(|| self.missing_line(global))?;
        if !line.is_code() {
            return Err("Can't comment on hunk headers".to_string());
        }
        Ok(pos)
    }

    fn print_all<W: Write>(&self, out: &mut W) -> Result<()> {
        for (file_index, file) in self.doc.files().iter().enumerate() {
            writeln!(
                out,
                "== {} (+{} -{})",
                file.path,
                file.additions(),
                file.deletions()
            )?;
            for (position, line) in file.lines().iter().enumerate() {
                let pos = LinePosition::new(file_index, position);
                let Some(global) = self.index.global_index(pos) else {
                    continue;
                };
                print_line(out, global, line)?;
                if let Some(comment) = get_comment(&self.doc, pos) {
                    writeln!(out, "      → [Comment] {}", comment.content)?;
                }
            }
        }
        Ok(())
    }

    fn print_comments<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.doc.comment_count() == 0 {
            writeln!(out, "No comments yet")?;
            return Ok(());
        }
        for (pos, comment) in comments(&self.doc) {
            let global = self.index.global_index(pos).unwrap_or_default();
            let line = comment
                .line_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "[{}] {}:{}  {}",
                global, comment.file, line, comment.content
            )?;
        }
        Ok(())
    }
}

fn print_line<W: Write>(out: &mut W, global: usize, line: &DiffLineRecord) -> Result<()> {
    let number = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();

    if line.is_code() {
        writeln!(
            out,
            "{:>5} {:>5} {:>5} {}{}",
            global,
            number(line.old_line_number),
            number(line.new_line_number),
            line.kind.prefix(),
            line.content
        )?;
    } else {
        writeln!(out, "{:>5} {}", global, line.content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diff_feedback::{parse_unified_diff, FeedbackRecord};
    use pretty_assertions::assert_eq;

    const DIFF: &str = "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1,2 +1,3 @@\n line1\n-line2\n+line2b\n+line3\ndiff --git a/y b/y\n--- a/y\n+++ b/y\n@@ -4 +4 @@\n-same\n+same\n";

    fn session(dir: &tempfile::TempDir) -> ReviewSession {
        ReviewSession::new(
            parse_unified_diff(DIFF),
            "git diff HEAD",
            dir.path().join("feedback.json"),
        )
    }

    fn apply(session: &mut ReviewSession, input: &str) -> String {
        let mut out = Vec::new();
        let action = ReviewAction::parse(input).unwrap().unwrap();
        session.handle_action(action, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_comment_create_edit_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        assert_eq!(apply(&mut session, "c 1 first"), "Comment added\n");
        assert_eq!(apply(&mut session, "c 1 second"), "Comment updated\n");
        let pos = LinePosition::new(0, 1);
        assert_eq!(get_comment(session.document(), pos).unwrap().content, "second");

        assert_eq!(apply(&mut session, "d 1"), "Comment deleted\n");
        assert_eq!(apply(&mut session, "d 1"), "No comment to delete on this line\n");
        assert_eq!(session.document().comment_count(), 0);
    }

    #[test]
    fn test_edit_requires_existing_comment() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        assert_eq!(apply(&mut session, "e 1 reworded"), "No comment to edit on this line\n");
        assert_eq!(session.document().comment_count(), 0);

        apply(&mut session, "c 1 first");
        assert_eq!(apply(&mut session, "edit 1 reworded"), "Comment updated\n");
        let pos = LinePosition::new(0, 1);
        assert_eq!(get_comment(session.document(), pos).unwrap().content, "reworded");
        assert_eq!(apply(&mut session, "e 0 header"), "Can't comment on hunk headers\n");
    }

    #[test]
    fn test_global_index_crosses_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        // File x has 5 lines, so 7 is the added "same" of file y.
        apply(&mut session, "c 7 duplicate content");
        let comment = get_comment(session.document(), LinePosition::new(1, 2)).unwrap();
        assert_eq!(comment.file, "y");
        assert_eq!(comment.line_number, Some(4));
        assert!(get_comment(session.document(), LinePosition::new(1, 1)).is_none());
    }

    #[test]
    fn test_notices_do_not_change_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);

        assert_eq!(apply(&mut session, "c 0 header"), "Can't comment on hunk headers\n");
        assert_eq!(apply(&mut session, "c 2"), "Empty comment, nothing changed\n");
        assert!(apply(&mut session, "c 99 far").starts_with("No line 99"));
        assert_eq!(session.document().comment_count(), 0);
    }

    #[test]
    fn test_show_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        apply(&mut session, "c 2 why?");

        let shown = apply(&mut session, "show 2");
        assert!(shown.contains("-line2"));
        assert!(shown.contains("→ [Comment] why?"));

        let listed = apply(&mut session, "list");
        assert!(listed.starts_with("== x (+2 -1)\n"));
        assert!(listed.contains("== y (+1 -1)"));
        assert!(listed.contains("@@ -1,2 +1,3 @@"));
    }

    #[test]
    fn test_comments_listing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        assert_eq!(apply(&mut session, "comments"), "No comments yet\n");

        apply(&mut session, "c 4 last line");
        assert_eq!(apply(&mut session, "comments"), "[4] x:3  last line\n");
    }

    #[test]
    fn test_run_saves_on_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let input = "c 3 new name\nbogus\n\nc 1 ctx\n";
        let mut out = Vec::new();

        let record = session.run(input.as_bytes(), &mut out).unwrap();

        let contents: Vec<&str> = record.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["ctx", "new name"]);

        let saved: FeedbackRecord = serde_json_from_file(&dir.path().join("feedback.json"));
        assert_eq!(saved.comments, record.comments);
        assert_eq!(saved.diff_command, "git diff HEAD");

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Unknown command 'bogus'"));
        assert!(printed.contains("Feedback saved to"));
    }

    #[test]
    fn test_run_stops_at_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut out = Vec::new();

        let record = session
            .run("c 1 kept\nq\nc 2 ignored\n".as_bytes(), &mut out)
            .unwrap();
        assert_eq!(record.comments.len(), 1);
    }

    #[test]
    fn test_run_skips_non_utf8_lines_and_keeps_comments() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let mut out = Vec::new();
        let input: &[u8] = b"c 1 important note\nc 2 caf\xe9\nc 3 after\nq\n";

        let record = session.run(input, &mut out).unwrap();

        let contents: Vec<&str> = record.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["important note", "after"]);
        let saved = serde_json_from_file(&dir.path().join("feedback.json"));
        assert_eq!(saved.comments, record.comments);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Input is not valid UTF-8, line ignored"));
    }

    fn serde_json_from_file(path: &std::path::Path) -> FeedbackRecord {
        let text = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}
