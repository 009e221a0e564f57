//! Store configuration shared by every front end.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Key the board collection has always been persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "taskit-board-storage";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Directory holding the snapshot file. Front ends pick a platform default when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: default_storage_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, "taskit-board-storage");
    }

    #[test]
    fn test_camel_case_fields() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"dataDir":"/tmp/tb","storageKey":"work"}"#).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/tb")));
        assert_eq!(config.storage_key, "work");
    }
}
