//! Classification of a single unified diff line.
//!
//! [`classify_line`] is a pure function: it receives the line together with
//! the running parser state (whether a file section is open, and the current
//! old/new counters) and returns what the line is plus the counters to use for
//! the next line.

use std::sync::OnceLock;

use regex::Regex;

use super::ParseError;

/// Marker starting a new file section.
pub const FILE_SEPARATOR: &str = "diff --git";
/// Marker carrying the path of the new file version.
pub const NEW_FILE_MARKER: &str = "+++ ";
/// Marker starting a hunk.
pub const HUNK_MARKER: &str = "@@";

/// Running old/new line counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounters {
    /// Next line number in the old file.
    pub old: u32,
    /// Next line number in the new file.
    pub new: u32,
}

/// Starting lines parsed out of a hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub old_start: u32,
    pub new_start: u32,
}

/// What a single raw line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `diff --git ...`: closes the current file section.
    FileBoundary,
    /// `+++ b/path`: opens a new file section.
    NewFile { path: String },
    /// `@@ ... @@`. `range` is `None` when the numbers could not be parsed.
    HunkHeader {
        text: &'a str,
        range: Option<HunkRange>,
    },
    Context {
        content: &'a str,
        old_line: u32,
        new_line: u32,
    },
    Added {
        content: &'a str,
        new_line: u32,
    },
    Removed {
        content: &'a str,
        old_line: u32,
    },
    /// Empty line, or a line outside any file section.
    Skipped,
}

/// Classify `line` given whether a file section is open and the current counters.
///
/// Returns the classification and the counters for the next line.
///
/// Any line without a `+`/`-` marker counts as context, including git's
/// `\ No newline at end of file` marker. Such a line advances both counters,
/// so lines after it in the same hunk are numbered one higher than in the
/// files themselves.
pub fn classify_line(
    line: &str,
    in_file: bool,
    counters: LineCounters,
) -> (LineClass<'_>, LineCounters) {
    if line.is_empty() {
        return (LineClass::Skipped, counters);
    }

    if line.starts_with(FILE_SEPARATOR) {
        return (LineClass::FileBoundary, counters);
    }

    if let Some(rest) = line.strip_prefix(NEW_FILE_MARKER) {
        let path = clean_path(rest).to_string();
        return (LineClass::NewFile { path }, counters);
    }

    if line.starts_with(HUNK_MARKER) {
        return match parse_hunk_header(line) {
            Ok(range) => (
                LineClass::HunkHeader {
                    text: line,
                    range: Some(range),
                },
                LineCounters {
                    old: range.old_start,
                    new: range.new_start,
                },
            ),
            Err(e) => {
                log::debug!("{}, keeping previous line counters", e);
                (
                    LineClass::HunkHeader {
                        text: line,
                        range: None,
                    },
                    counters,
                )
            }
        };
    }

    if !in_file {
        return (LineClass::Skipped, counters);
    }

    if let Some(content) = line.strip_prefix('+') {
        let next = LineCounters {
            new: counters.new.saturating_add(1),
            ..counters
        };
        return (
            LineClass::Added {
                content,
                new_line: counters.new,
            },
            next,
        );
    }

    if let Some(content) = line.strip_prefix('-') {
        let next = LineCounters {
            old: counters.old.saturating_add(1),
            ..counters
        };
        return (
            LineClass::Removed {
                content,
                old_line: counters.old,
            },
            next,
        );
    }

    // Anything else is context; only a leading space is a marker.
    let content = line.strip_prefix(' ').unwrap_or(line);
    let next = LineCounters {
        old: counters.old.saturating_add(1),
        new: counters.new.saturating_add(1),
    };
    (
        LineClass::Context {
            content,
            old_line: counters.old,
            new_line: counters.new,
        },
        next,
    )
}

/// Parse the starting line numbers out of `@@ -<old>[,n] +<new>[,n] @@...`.
pub fn parse_hunk_header(line: &str) -> Result<HunkRange, ParseError> {
    static HUNK_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HUNK_REGEX.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@").expect("hunk header regex is valid")
    });

    let malformed = || ParseError::MalformedHunkHeader(line.to_string());

    let captures = re.captures(line).ok_or_else(malformed)?;
    let old_start = captures[1].parse().map_err(|_| malformed())?;
    let new_start = captures[2].parse().map_err(|_| malformed())?;

    Ok(HunkRange {
        old_start,
        new_start,
    })
}

/// Clean the path of a `+++` line: trailing whitespace and the `b/` prefix.
fn clean_path(path: &str) -> &str {
    let path = path.trim_end();
    path.strip_prefix("b/").unwrap_or(path)
}
