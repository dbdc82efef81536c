//! Data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/diff-feedback/`
//! - macOS: `~/Library/Caches/diff-feedback/`
//! - Windows: `%LOCALAPPDATA%\diff-feedback\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "diff-feedback";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {:?}", dir))?;
    Ok(dir)
}

/// Get the path for a log file with the given name inside the cache directory
pub fn log_file_path(file_name: &str) -> Result<PathBuf> {
    Ok(cache_dir()?.join(file_name))
}
