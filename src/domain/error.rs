use thiserror::Error;

/// Host-level errors for BreedLens.
///
/// Failures of the prediction or catalog exchange itself are never reported
/// through this type; they are folded into `PredictionResult` and
/// `CatalogResult` by the interpreter.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("No image selected: image data is empty")]
    EmptyImage,

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),

    #[error("An identify request is already in progress")]
    RequestInFlight,

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(format!("invalid settings file: {}", err))
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(format!("could not encode settings: {}", err))
    }
}
