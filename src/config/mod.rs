//! Configuration module for terabox-history.
//!
//! Handles loading and merging configuration from multiple sources:
//! - CLI arguments (highest priority)
//! - `.tbhrc.toml` in the working directory
//! - User-level `~/.config/terabox-history/config.toml`

pub mod file;
mod types;

pub use file::{generate_example_config, load_config};
pub use types::{
    Config, ConfigLayer, FilterConfig, FilterLayer, HistoryConfig, HistoryLayer, StorageConfig,
};
