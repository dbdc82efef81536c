//! Configuration and file locations for diff-feedback
//!
//! This crate provides:
//! - Platform directories for logs (via `dirs`)
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::{config_search_paths, load_config_file, CONFIG_FILE};
pub use paths::{cache_dir, log_file_path};
