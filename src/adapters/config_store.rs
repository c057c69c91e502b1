use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{AppConfig, DomainError};
use crate::ports::ConfigStore;

const APP_DIR: &str = "BreedLens";
const CONFIG_FILE: &str = "config.toml";

/// Settings persisted as `config.toml` in a per-user directory.
pub struct TomlConfigStore {
    data_dir: PathBuf,
    logs_dir: PathBuf,
}

impl TomlConfigStore {
    /// Create a store under the OS application directories.
    /// - Settings: `<config dir>/BreedLens/config.toml`
    /// - Logs: `<data dir>/BreedLens/logs/`
    pub fn new() -> Result<Self, DomainError> {
        let data_dir = dirs::config_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or_else(|| {
                DomainError::Config("Could not find application config directory".to_string())
            })?;
        let logs_dir = dirs::data_dir()
            .map(|p| p.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| data_dir.join("logs"));

        Self::with_dirs(data_dir, logs_dir)
    }

    /// Create a store rooted at an explicit directory, logs included.
    pub fn at(data_dir: PathBuf) -> Result<Self, DomainError> {
        let logs_dir = data_dir.join("logs");
        Self::with_dirs(data_dir, logs_dir)
    }

    fn with_dirs(data_dir: PathBuf, logs_dir: PathBuf) -> Result<Self, DomainError> {
        fs::create_dir_all(&data_dir)?;
        debug!(data_dir = ?data_dir, logs_dir = ?logs_dir, "Settings store ready");
        Ok(Self { data_dir, logs_dir })
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DomainError> {
        let path = self.config_path();

        match fs::read_to_string(&path) {
            Ok(content) => {
                let config: AppConfig = toml::from_str(&content)?;
                info!(path = ?path, api = %config.api.base_url, "Settings loaded");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?path, "No settings file yet, writing defaults");
                let config = AppConfig::new();
                self.save(&config)?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), DomainError> {
        let path = self.config_path();
        fs::create_dir_all(&self.data_dir)?;
        fs::write(&path, toml::to_string_pretty(config)?)?;

        info!(path = ?path, "Settings saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn logs_dir(&self) -> PathBuf {
        self.logs_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    use crate::domain::Language;

    #[test]
    fn test_explicit_dir_paths() {
        let temp_dir = env::temp_dir().join("breedlens_store_paths_test");
        let store = TomlConfigStore::at(temp_dir.clone()).unwrap();

        assert!(store.config_path().ends_with("config.toml"));
        assert_eq!(store.logs_dir(), temp_dir.join("logs"));
        assert_eq!(store.data_dir(), temp_dir);

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let temp_dir = env::temp_dir().join("breedlens_store_defaults_test");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = TomlConfigStore::at(temp_dir.clone()).unwrap();
        let config = store.load().unwrap();
        assert_eq!(config.prediction.top_k, 3);
        assert!(store.config_path().exists());

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = env::temp_dir().join("breedlens_store_roundtrip_test");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = TomlConfigStore::at(temp_dir.clone()).unwrap();

        let mut config = AppConfig::new();
        config.api.base_url = "http://10.0.0.5:8000".to_string();
        config.prediction.threshold = 0.75;
        config.prediction.language = Language::Hindi;
        config.logging.level = "debug".to_string();
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.api.base_url, "http://10.0.0.5:8000");
        assert_eq!(loaded.prediction.threshold, 0.75);
        assert_eq!(loaded.prediction.language, Language::Hindi);
        assert_eq!(loaded.logging.level, "debug");

        let _ = fs::remove_dir_all(&temp_dir);
    }
}
