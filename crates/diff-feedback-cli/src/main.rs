use anyhow::{Context, Result};
use clap::Parser;
use diff_feedback::{parse_for_review, ParseError};
use diff_feedback_config::AppConfig;
use std::io;
use std::path::PathBuf;

mod action;
mod git;
mod logger;
mod session;

use session::ReviewSession;

#[derive(Parser)]
#[command(name = "diff-feedback")]
#[command(about = "Comment on the lines of a git diff and save the comments as JSON", long_about = None)]
struct Cli {
    /// Read the diff from a file instead of running git
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Reference to diff the working tree against
    #[arg(long, short = 'b')]
    base: Option<String>,

    /// Where to write the feedback record
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    /// Apply command line overrides on top of the file configuration.
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(base) = &self.base {
            config.base_ref = base.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = logger::init(cli.verbose)?;
    log::info!("Starting diff-feedback, logging to {}", log_file.display());

    let config = cli.apply(AppConfig::load());

    let diff_text = match &cli.input {
        Some(path) => git::read_diff_file(path)?,
        None => git::working_tree_diff(&config)?,
    };
    let diff_command = config.diff_command_label();

    let doc = match parse_for_review(&diff_text) {
        Ok(doc) => doc,
        Err(ParseError::EmptyDocument) => {
            println!("No changes to review ({})", diff_command);
            log::info!("Nothing to review, exiting");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to parse diff"),
    };

    let mut session = ReviewSession::new(doc, diff_command, config.output_path.clone());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let record = session.run(stdin.lock(), &mut stdout)?;

    log::info!(
        "Exiting diff-feedback with {} comments",
        record.comments.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["diff-feedback", "--base", "main", "-o", "out/review.json"]);
        let config = cli.apply(AppConfig::default());

        assert_eq!(config.base_ref, "main");
        assert_eq!(config.output_path, PathBuf::from("out/review.json"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_keeps_config_defaults() {
        let cli = Cli::parse_from(["diff-feedback", "-v"]);
        let config = cli.apply(AppConfig::default());

        assert_eq!(config, AppConfig::default());
        assert!(cli.verbose);
        assert!(cli.input.is_none());
    }
}
