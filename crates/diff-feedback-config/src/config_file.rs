use std::{env, path::PathBuf};

/// Name of the configuration file.
pub const CONFIG_FILE: &str = ".diff-feedback.toml";

/// Candidate config file locations, in lookup order.
///
/// 1. `./.diff-feedback.toml`
/// 2. `$HOME/.diff-feedback.toml` (if HOME is set)
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(CONFIG_FILE));
    }
    paths
}

/// Load config file content from the first location that can be read.
///
/// Returns the path it was read from together with the content.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    config_search_paths().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some((path, content))
    })
}
