//! Obtaining the diff text.

use anyhow::{bail, Context, Result};
use diff_feedback_config::AppConfig;
use std::path::Path;
use std::process::Command;

/// Run `git diff` against the configured base and return its output.
pub fn working_tree_diff(config: &AppConfig) -> Result<String> {
    let args = config.git_diff_args();
    log::debug!("Running git {}", args.join(" "));

    let output = Command::new("git")
        .args(&args)
        .output()
        .context("Failed to run git diff")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{} failed: {}", config.diff_command_label(), stderr.trim());
    }

    String::from_utf8(output.stdout).context("Invalid UTF-8 in git diff output")
}

/// Read a saved diff from disk.
pub fn read_diff_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read diff file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_diff_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("change.diff");
        std::fs::write(&path, "+++ b/x\n").unwrap();

        assert_eq!(read_diff_file(&path).unwrap(), "+++ b/x\n");
        assert!(read_diff_file(&dir.path().join("missing.diff")).is_err());
    }
}
