use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Persistence for the client settings (backend URL, default identify
/// parameters, logging).
pub trait ConfigStore: Send + Sync {
    /// Load the settings, writing defaults first if nothing is stored yet.
    fn load(&self) -> Result<AppConfig, DomainError>;

    /// Persist the settings.
    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    fn config_path(&self) -> PathBuf;

    fn data_dir(&self) -> PathBuf;

    fn logs_dir(&self) -> PathBuf;
}
