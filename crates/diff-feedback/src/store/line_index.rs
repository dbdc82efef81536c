//! Mapping between flattened (global) line indices and [`LinePosition`]s.

use crate::model::{DiffDocument, LinePosition};

/// Cumulative line offsets of a document's files.
///
/// Line sequences are immutable after parsing, so an index built once stays
/// valid for the whole review session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Global index of the first line of each file.
    offsets: Vec<usize>,
    /// Number of lines of each file.
    lengths: Vec<usize>,
    total: usize,
}

impl LineIndex {
    pub fn new(doc: &DiffDocument) -> Self {
        let mut offsets = Vec::with_capacity(doc.files().len());
        let mut lengths = Vec::with_capacity(doc.files().len());
        let mut total = 0;

        for file in doc.files() {
            offsets.push(total);
            lengths.push(file.lines().len());
            total += file.lines().len();
        }

        Self {
            offsets,
            lengths,
            total,
        }
    }

    /// Total number of lines across all files.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Resolve a global line index to a file and position within it.
    pub fn resolve(&self, global: usize) -> Option<LinePosition> {
        if global >= self.total {
            return None;
        }
        // Empty files share their offset with the next file; take the last match.
        let file_index = self.offsets.partition_point(|&start| start <= global) - 1;
        Some(LinePosition::new(
            file_index,
            global - self.offsets[file_index],
        ))
    }

    /// Inverse of [`LineIndex::resolve`].
    pub fn global_index(&self, position: LinePosition) -> Option<usize> {
        let len = *self.lengths.get(position.file_index)?;
        if position.position >= len {
            return None;
        }
        Some(self.offsets[position.file_index] + position.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unified_diff;

    const DIFF: &str = "+++ b/a\n@@ -1 +1 @@\n+a1\n+a2\n+++ b/empty\n+++ b/c\n@@ -1 +1 @@\n-c1\n+++ b/trailing\n";

    #[test]
    fn test_resolve_across_files() {
        let doc = parse_unified_diff(DIFF);
        let index = LineIndex::new(&doc);

        assert_eq!(index.len(), 5);
        assert_eq!(index.resolve(0), Some(LinePosition::new(0, 0)));
        assert_eq!(index.resolve(2), Some(LinePosition::new(0, 2)));
        // File 1 is empty, so global 3 lands in file 2.
        assert_eq!(index.resolve(3), Some(LinePosition::new(2, 0)));
        assert_eq!(index.resolve(4), Some(LinePosition::new(2, 1)));
        assert_eq!(index.resolve(5), None);
    }

    #[test]
    fn test_global_index_round_trips() {
        let doc = parse_unified_diff(DIFF);
        let index = LineIndex::new(&doc);

        for global in 0..index.len() {
            let pos = index.resolve(global).unwrap();
            assert_eq!(index.global_index(pos), Some(global));
        }
        assert_eq!(index.global_index(LinePosition::new(1, 0)), None);
        assert_eq!(index.global_index(LinePosition::new(0, 3)), None);
        assert_eq!(index.global_index(LinePosition::new(9, 0)), None);
    }

    #[test]
    fn test_empty_document() {
        let index = LineIndex::new(&DiffDocument::default());
        assert!(index.is_empty());
        assert_eq!(index.resolve(0), None);
    }
}
