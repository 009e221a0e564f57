//! Configuration for the taskboard CLI.
//! Reads config.json from ~/.config/taskboard/config.json (or platform equivalent).

use std::fs;
use std::path::{Path, PathBuf};

use taskboard_core::config::StoreConfig;

/// Default config path: ~/.config/taskboard/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
        .join("config.json")
}

/// Default snapshot directory: ~/.local/share/taskboard (or platform equivalent).
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
}

/// Load config from path. Returns default if the file is missing or malformed.
pub fn load_config(path: &Path) -> StoreConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Failed to parse config {}: {}", path.display(), e);
            StoreConfig::default()
        }),
        Err(_) => {
            log::info!("No config at {}, using defaults", path.display());
            StoreConfig::default()
        }
    }
}

/// Fully resolved settings: CLI flags > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

pub fn resolve(
    file: StoreConfig,
    data_dir_flag: Option<PathBuf>,
    key_flag: Option<String>,
) -> ResolvedConfig {
    ResolvedConfig {
        data_dir: data_dir_flag
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir),
        storage_key: key_flag.unwrap_or(file.storage_key),
    }
}
