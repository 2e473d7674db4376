use crate::error::{QuireError, Result};
use crate::store::fs::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_AUTOSAVE_SECS: u64 = 30;

pub const KEYS: &[&str] = &["autosave-secs", "data-file", "confirm-import"];

/// Configuration for quire, stored as config.json in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuireConfig {
    /// Seconds between autosaves. 0 turns the timer off.
    #[serde(default = "default_autosave_secs")]
    pub autosave_secs: u64,

    /// Name of the document file inside the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Ask before an import replaces the current pages
    #[serde(default = "default_confirm_import")]
    pub confirm_import: bool,
}

fn default_autosave_secs() -> u64 {
    DEFAULT_AUTOSAVE_SECS
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_confirm_import() -> bool {
    true
}

impl Default for QuireConfig {
    fn default() -> Self {
        Self {
            autosave_secs: default_autosave_secs(),
            data_file: default_data_file(),
            confirm_import: default_confirm_import(),
        }
    }
}

impl QuireConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuireError::Io)?;
        let config: QuireConfig =
            serde_json::from_str(&content).map_err(QuireError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuireError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QuireError::Serialization)?;
        fs::write(config_path, content).map_err(QuireError::Io)?;
        Ok(())
    }

    /// `None` when autosave is disabled.
    pub fn autosave_interval(&self) -> Option<Duration> {
        (self.autosave_secs > 0).then(|| Duration::from_secs(self.autosave_secs))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "autosave-secs" => Some(self.autosave_secs.to_string()),
            "data-file" => Some(self.data_file.clone()),
            "confirm-import" => Some(self.confirm_import.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "autosave-secs" => {
                self.autosave_secs = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid number of seconds: {}", value))?;
            }
            "data-file" => {
                let name = value.trim();
                if name.is_empty() || name.contains('/') || name.contains('\\') {
                    return Err(format!("Invalid data file name: {}", value));
                }
                self.data_file = name.to_string();
            }
            "confirm-import" => {
                self.confirm_import = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(format!("Invalid boolean: {}", value)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuireConfig::default();
        assert_eq!(config.autosave_secs, 30);
        assert_eq!(config.data_file, "quire.json");
        assert!(config.confirm_import);
        assert_eq!(config.autosave_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_disables_autosave() {
        let mut config = QuireConfig::default();
        config.set("autosave-secs", "0").unwrap();
        assert_eq!(config.autosave_interval(), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = QuireConfig::default();
        assert!(config.set("autosave-secs", "soon").is_err());
        assert!(config.set("data-file", "../escape.json").is_err());
        assert!(config.set("confirm-import", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, QuireConfig::default());
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = QuireConfig::default();
        assert_eq!(config.get("confirm-import").as_deref(), Some("true"));
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuireConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, QuireConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = QuireConfig::default();
        config.set("autosave-secs", "5").unwrap();
        config.set("confirm-import", "no").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = QuireConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.autosave_secs, 5);
        assert!(!loaded.confirm_import);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"autosave_secs": 12}"#).unwrap();
        let loaded = QuireConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.autosave_secs, 12);
        assert_eq!(loaded.data_file, "quire.json");
    }
}
