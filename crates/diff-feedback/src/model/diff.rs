//! Diff data structures representing a parsed working-tree diff.

use std::collections::BTreeMap;

use super::comment::CommentRecord;

/// A complete parsed diff.
///
/// Built once by the parser. After that the line sequences never change; only
/// the per-file comment mappings do, and only through [`crate::store`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffDocument {
    files: Vec<FileEntry>,
}

impl DiffDocument {
    /// Create a document from already-assembled file entries.
    pub fn new(files: Vec<FileEntry>) -> Self {
        Self { files }
    }

    /// All files, in the order they appear in the diff text.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Get a file by index.
    pub fn file(&self, index: usize) -> Option<&FileEntry> {
        self.files.get(index)
    }

    pub(crate) fn file_mut(&mut self, index: usize) -> Option<&mut FileEntry> {
        self.files.get_mut(index)
    }

    /// True when no file section was recognized.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of line records across all files.
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines.len()).sum()
    }

    /// Total added lines across all files.
    pub fn total_additions(&self) -> usize {
        self.files.iter().map(FileEntry::additions).sum()
    }

    /// Total removed lines across all files.
    pub fn total_deletions(&self) -> usize {
        self.files.iter().map(FileEntry::deletions).sum()
    }

    /// Number of comments attached anywhere in the document.
    pub fn comment_count(&self) -> usize {
        self.files.iter().map(FileEntry::comment_count).sum()
    }
}

/// A single file's section of the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    /// File path with the `b/` prefix removed.
    pub path: String,
    lines: Vec<DiffLineRecord>,
    /// Comments keyed by position-within-file (index into `lines`).
    comments: BTreeMap<usize, CommentRecord>,
}

impl FileEntry {
    /// Create an empty file entry.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
            comments: BTreeMap::new(),
        }
    }

    /// Line records in diff order.
    pub fn lines(&self) -> &[DiffLineRecord] {
        &self.lines
    }

    /// Line record at a position-within-file.
    pub fn line(&self, position: usize) -> Option<&DiffLineRecord> {
        self.lines.get(position)
    }

    /// Comments ordered by position-within-file.
    pub fn comments(&self) -> impl Iterator<Item = (usize, &CommentRecord)> {
        self.comments.iter().map(|(pos, comment)| (*pos, comment))
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Added)
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Removed)
            .count()
    }

    pub(crate) fn push_line(&mut self, line: DiffLineRecord) {
        self.lines.push(line);
    }

    pub(crate) fn comment(&self, position: usize) -> Option<&CommentRecord> {
        self.comments.get(&position)
    }

    pub(crate) fn insert_comment(
        &mut self,
        position: usize,
        comment: CommentRecord,
    ) -> Option<CommentRecord> {
        self.comments.insert(position, comment)
    }

    pub(crate) fn remove_comment(&mut self, position: usize) -> Option<CommentRecord> {
        self.comments.remove(&position)
    }
}

/// A single line in the diff as shown to a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLineRecord {
    /// Line type.
    pub kind: LineKind,
    /// Line content without its leading marker. Hunk headers keep the full line.
    pub content: String,
    /// Line number in the old file (Context and Removed).
    pub old_line_number: Option<u32>,
    /// Line number in the new file (Context and Added).
    pub new_line_number: Option<u32>,
    /// File this line belongs to.
    pub file_path: String,
    /// Most recent hunk header seen before this line.
    pub hunk_header: String,
}

impl DiffLineRecord {
    /// Create a new context line.
    pub fn context(
        content: impl Into<String>,
        old_line: u32,
        new_line: u32,
        file_path: impl Into<String>,
        hunk_header: impl Into<String>,
    ) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
            file_path: file_path.into(),
            hunk_header: hunk_header.into(),
        }
    }

    /// Create a new added line.
    pub fn added(
        content: impl Into<String>,
        new_line: u32,
        file_path: impl Into<String>,
        hunk_header: impl Into<String>,
    ) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line),
            file_path: file_path.into(),
            hunk_header: hunk_header.into(),
        }
    }

    /// Create a new removed line.
    pub fn removed(
        content: impl Into<String>,
        old_line: u32,
        file_path: impl Into<String>,
        hunk_header: impl Into<String>,
    ) -> Self {
        Self {
            kind: LineKind::Removed,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: None,
            file_path: file_path.into(),
            hunk_header: hunk_header.into(),
        }
    }

    /// Create a hunk header line. Content and header are both the raw `@@` line.
    pub fn hunk_header(header: impl Into<String>, file_path: impl Into<String>) -> Self {
        let header = header.into();
        Self {
            kind: LineKind::HunkHeader,
            content: header.clone(),
            old_line_number: None,
            new_line_number: None,
            file_path: file_path.into(),
            hunk_header: header,
        }
    }

    /// Get the line number to display (prefers new, falls back to old).
    pub fn display_line_number(&self) -> Option<u32> {
        self.new_line_number.or(self.old_line_number)
    }

    /// Whether this line carries code (anything but a hunk header).
    pub fn is_code(&self) -> bool {
        self.kind != LineKind::HunkHeader
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line.
    Context,
    /// Added line (+).
    Added,
    /// Removed line (-).
    Removed,
    /// @@ header line.
    HunkHeader,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::HunkHeader => '@',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> FileEntry {
        let mut file = FileEntry::new("src/main.rs");
        let header = "@@ -1,2 +1,2 @@";
        file.push_line(DiffLineRecord::hunk_header(header, "src/main.rs"));
        file.push_line(DiffLineRecord::context("fn main() {", 1, 1, "src/main.rs", header));
        file.push_line(DiffLineRecord::removed("    old()", 2, "src/main.rs", header));
        file.push_line(DiffLineRecord::added("    new()", 2, "src/main.rs", header));
        file
    }

    #[test]
    fn test_line_constructors_respect_numbering() {
        let ctx = DiffLineRecord::context("unchanged", 5, 6, "a.rs", "@@");
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.old_line_number, Some(5));
        assert_eq!(ctx.new_line_number, Some(6));

        let add = DiffLineRecord::added("new line", 10, "a.rs", "@@");
        assert_eq!(add.old_line_number, None);
        assert_eq!(add.new_line_number, Some(10));

        let del = DiffLineRecord::removed("removed line", 8, "a.rs", "@@");
        assert_eq!(del.old_line_number, Some(8));
        assert_eq!(del.new_line_number, None);

        let hdr = DiffLineRecord::hunk_header("@@ -1 +1 @@", "a.rs");
        assert_eq!(hdr.old_line_number, None);
        assert_eq!(hdr.new_line_number, None);
        assert_eq!(hdr.content, hdr.hunk_header);
        assert!(!hdr.is_code());
    }

    #[test]
    fn test_display_line_number_prefers_new() {
        let ctx = DiffLineRecord::context("x", 3, 7, "a.rs", "@@");
        assert_eq!(ctx.display_line_number(), Some(7));

        let del = DiffLineRecord::removed("x", 4, "a.rs", "@@");
        assert_eq!(del.display_line_number(), Some(4));

        let hdr = DiffLineRecord::hunk_header("@@", "a.rs");
        assert_eq!(hdr.display_line_number(), None);
    }

    #[test]
    fn test_file_stats() {
        let file = sample_file();
        assert_eq!(file.lines().len(), 4);
        assert_eq!(file.additions(), 1);
        assert_eq!(file.deletions(), 1);
        assert_eq!(file.comment_count(), 0);
    }

    #[test]
    fn test_document_totals() {
        let doc = DiffDocument::new(vec![sample_file(), FileEntry::new("empty.rs")]);
        assert!(!doc.is_empty());
        assert_eq!(doc.total_lines(), 4);
        assert_eq!(doc.total_additions(), 1);
        assert_eq!(doc.total_deletions(), 1);
        assert!(doc.file(1).unwrap().lines().is_empty());
        assert!(DiffDocument::default().is_empty());
    }

    #[test]
    fn test_line_kind_prefix() {
        assert_eq!(LineKind::Context.prefix(), ' ');
        assert_eq!(LineKind::Added.prefix(), '+');
        assert_eq!(LineKind::Removed.prefix(), '-');
        assert_eq!(LineKind::HunkHeader.prefix(), '@');
    }
}
