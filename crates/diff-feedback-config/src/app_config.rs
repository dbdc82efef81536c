//! Application configuration
//!
//! Configuration loaded from `.diff-feedback.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from .diff-feedback.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Reference the working tree is compared against (`git diff <base_ref>`)
    #[serde(default = "default_base_ref")]
    pub base_ref: String,

    /// Where the feedback record is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Number of context lines passed to git as `-U<n>` (git's default if unset)
    #[serde(default)]
    pub context_lines: Option<u32>,
}

fn default_base_ref() -> String {
    "HEAD".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("feedback.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_ref: default_base_ref(),
            output_path: default_output_path(),
            context_lines: None,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid diff-feedback configuration")
    }

    /// Arguments for the git invocation producing the diff
    pub fn git_diff_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["diff", "--no-color", "--src-prefix=a/", "--dst-prefix=b/"]
            .into_iter()
            .map(String::from)
            .collect();
        if let Some(n) = self.context_lines {
            args.push(format!("-U{}", n));
        }
        args.push(self.base_ref.clone());
        args
    }

    /// Human-readable label of the diff command, recorded in the feedback
    pub fn diff_command_label(&self) -> String {
        format!("git diff {}", self.base_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_ref, "HEAD");
        assert_eq!(config.output_path, PathBuf::from("feedback.json"));
        assert_eq!(config.context_lines, None);
        assert_eq!(config.diff_command_label(), "git diff HEAD");
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            base_ref = "origin/main"
            output_path = "review/feedback.json"
            context_lines = 5
        "#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.base_ref, "origin/main");
        assert_eq!(config.output_path, PathBuf::from("review/feedback.json"));
        assert_eq!(config.context_lines, Some(5));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = AppConfig::from_toml(r#"base_ref = "main""#).unwrap();
        assert_eq!(config.base_ref, "main");
        // Other fields should use defaults
        assert_eq!(config.output_path, PathBuf::from("feedback.json"));
        assert_eq!(config.context_lines, None);
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        assert!(AppConfig::from_toml("context_lines = \"many\"").is_err());
    }

    #[test]
    fn test_git_diff_args() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.git_diff_args(),
            vec!["diff", "--no-color", "--src-prefix=a/", "--dst-prefix=b/", "HEAD"]
        );

        config.context_lines = Some(10);
        config.base_ref = "v1.0".to_string();
        assert_eq!(
            config.git_diff_args(),
            vec!["diff", "--no-color", "--src-prefix=a/", "--dst-prefix=b/", "-U10", "v1.0"]
        );
        assert_eq!(config.diff_command_label(), "git diff v1.0");
    }
}
