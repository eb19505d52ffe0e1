//! Path utilities.

use std::path::{Path, PathBuf};

/// Application directory name under the platform config/data dirs.
pub const APP_DIR: &str = "terabox-history";

/// Name of the working-directory config file.
pub const LOCAL_CONFIG_NAME: &str = ".tbhrc.toml";

/// Get the config directory.
///
/// Returns `~/.config/terabox-history` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR))
}

/// Get the data directory.
///
/// Returns `~/.local/share/terabox-history` on Linux.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_DIR))
}

/// Get the default storage file path.
pub fn storage_file() -> Option<PathBuf> {
    data_dir().map(|p| p.join("storage.json"))
}

/// Get the global config file path.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Find the local config file in a directory, if it exists.
pub fn local_config_file(dir: &Path) -> Option<PathBuf> {
    let config_file = dir.join(LOCAL_CONFIG_NAME);
    if config_file.exists() {
        Some(config_file)
    } else {
        None
    }
}
