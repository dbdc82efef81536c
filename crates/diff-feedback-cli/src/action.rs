//! Review actions
//!
//! Each line the reviewer types is parsed into a [`ReviewAction`] and then
//! dispatched to the [`crate::session::ReviewSession`]. Line arguments are
//! global line indices as printed by `list`.

use anyhow::{bail, Context, Result};

/// Actions the review session understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    /// Print every line with its global index
    List,
    /// Print one line and its comment, if any
    Show(usize),
    /// Create or replace the comment on a line
    Comment { line: usize, text: String },
    /// Replace an existing comment on a line
    Edit { line: usize, text: String },
    /// Delete the comment on a line
    Delete(usize),
    /// Print all comments in diff order
    Comments,
    /// Write the feedback record and keep reviewing
    Write,
    /// Write the feedback record and stop
    Quit,
    /// Print the command summary
    Help,
}

pub const HELP: &str = "\
Commands:
  list                 show all diff lines with their index
  show <n>             show line <n> and its comment
  comment <n> <text>   add or replace the comment on line <n> (alias: c)
  edit <n> <text>      replace the existing comment on line <n> (alias: e)
  delete <n>           delete the comment on line <n> (alias: d)
  comments             show all comments
  write                save feedback without quitting (alias: w)
  quit                 save feedback and exit (alias: q)
  help                 show this help";

impl ReviewAction {
    /// Parse one input line. Blank input yields `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        let action = match verb {
            "list" | "ls" => Self::List,
            "show" | "s" => Self::Show(parse_line_arg(rest)?),
            "comment" | "c" => {
                let (line, text) = parse_line_and_text(rest)?;
                Self::Comment { line, text }
            }
            "edit" | "e" => {
                let (line, text) = parse_line_and_text(rest)?;
                Self::Edit { line, text }
            }
            "delete" | "d" => Self::Delete(parse_line_arg(rest)?),
            "comments" => Self::Comments,
            "write" | "w" => Self::Write,
            "quit" | "q" | "exit" => Self::Quit,
            "help" | "h" | "?" => Self::Help,
            other => bail!("Unknown command '{}', type 'help' for a list", other),
        };

        Ok(Some(action))
    }
}

fn parse_line_and_text(rest: &str) -> Result<(usize, String)> {
    let (line, text) = match rest.split_once(char::is_whitespace) {
        Some((line, text)) => (line, text.trim()),
        None => (rest, ""),
    };
    Ok((parse_line_arg(line)?, text.to_string()))
}

fn parse_line_arg(arg: &str) -> Result<usize> {
    if arg.is_empty() {
        bail!("Missing line index");
    }
    arg.parse()
        .with_context(|| format!("Invalid line index '{}'", arg))
}
