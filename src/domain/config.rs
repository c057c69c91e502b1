use serde::{Deserialize, Serialize};

use crate::domain::request::Language;

/// Default inference backend.
pub const DEFAULT_API_URL: &str = "https://animalbreeddetectorbackend-2.onrender.com";

/// Backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the inference service. Used verbatim as a path prefix.
    pub base_url: String,
    /// Timeout for `POST /predict` in seconds.
    pub predict_timeout_secs: u64,
    /// Timeout for `GET /breeds` in seconds.
    pub catalog_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            predict_timeout_secs: 60,
            catalog_timeout_secs: 15,
        }
    }
}

/// Default parameters for identify actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Confidence threshold (0.0-1.0).
    /// Higher values make the service more reluctant to suggest a breed.
    pub threshold: f64,
    /// Number of ranked predictions to request (1-5).
    pub top_k: u8,
    /// Response language.
    pub language: Language,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            top_k: 3,
            language: Language::English,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with daily rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub prediction: PredictionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_field_client() {
        let config = AppConfig::new();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.predict_timeout_secs, 60);
        assert_eq!(config.api.catalog_timeout_secs, 15);
        assert_eq!(config.prediction.threshold, 0.6);
        assert_eq!(config.prediction.top_k, 3);
        assert_eq!(config.prediction.language, Language::English);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [prediction]
            language = "hi"
            "#,
        )
        .unwrap();
        assert_eq!(config.prediction.language, Language::Hindi);
        assert_eq!(config.prediction.top_k, 3);
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }
}
