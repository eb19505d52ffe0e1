//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::types::{Config, ConfigLayer};
use crate::error::HistoryError;
use crate::utils::local_config_file;

/// Load one config layer from the specified path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: ConfigLayer = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Load configuration with proper priority and merging.
///
/// Searches for config files in order of priority (lowest to highest):
/// 1. `~/.config/terabox-history/config.toml` (user-level, lowest priority)
/// 2. `.tbhrc.toml` in the working directory
/// 3. CLI argument `--config <path>` (highest priority)
///
/// Missing config files are handled gracefully (defaults are used).
///
/// # Errors
///
/// Returns an error if a specified config file (via CLI) cannot be read or
/// parsed, or if the merged configuration has out-of-range values.
pub fn load_config(cli_config_path: Option<&Path>, work_dir: &Path) -> Result<Config> {
    let mut config = Config::default();

    // Load user-level config (lowest priority)
    if let Some(user_config_path) = Config::user_config_path() {
        if user_config_path.exists() {
            match load_config_from_path(&user_config_path) {
                Ok(user_config) => {
                    debug!(path = %user_config_path.display(), "loaded user config");
                    config.merge(user_config);
                }
                Err(e) => warn!(
                    path = %user_config_path.display(),
                    error = %format!("{e:#}"),
                    "failed to load user config"
                ),
            }
        }
    }

    // Load working-directory config (medium priority)
    if let Some(local_path) = local_config_file(work_dir) {
        match load_config_from_path(&local_path) {
            Ok(local_config) => {
                debug!(path = %local_path.display(), "loaded local config");
                config.merge(local_config);
            }
            Err(e) => warn!(
                path = %local_path.display(),
                error = %format!("{e:#}"),
                "failed to load local config"
            ),
        }
    }

    // Load CLI-specified config (highest priority)
    if let Some(cli_path) = cli_config_path {
        let cli_config = load_config_from_path(cli_path).with_context(|| {
            format!(
                "Failed to load config from CLI-specified path: {}",
                cli_path.display()
            )
        })?;
        config.merge(cli_config);

        config
            .validate()
            .map_err(|message| HistoryError::InvalidConfig {
                path: cli_path.to_path_buf(),
                message,
            })?;
    } else {
        config
            .validate()
            .map_err(|message| HistoryError::ConfigError { message })?;
    }

    Ok(config)
}

/// Generate an example configuration file with all options documented.
pub fn generate_example_config() -> String {
    r#"# terabox-history Configuration File
# Place this file at ~/.config/terabox-history/config.toml for global settings
# or .tbhrc.toml in the working directory for local settings

# History settings
[history]
# Max items kept after each add
max_items = 10

# Hours an item stays in the history
ttl_hours = 24

# Storage key holding the list
key = "terabox-history"

# Stored value is not a valid list: "reset" (back up and start fresh) or "fail"
on_corrupt = "reset"

# Storage settings
[storage]
# Storage file (default: platform data directory)
# path = "/path/to/storage.json"

# Filter settings
[filter]
# Fuzzy matching
fuzzy = true

# Case sensitive search
case_sensitive = false
"#
    .to_string()
}
