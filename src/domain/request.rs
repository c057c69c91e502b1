use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::config::ApiConfig;
use crate::domain::DomainError;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "file";
/// Filename sent for every image, regardless of the source format.
pub const IMAGE_FILENAME: &str = "image.jpg";
/// Content type sent for every image, regardless of the source format.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Language the service should answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// Wire code sent as the `lang` form field.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    /// Label shown in language pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
        }
    }
}

impl FromStr for Language {
    type Err = DomainError;

    /// Accepts wire codes and picker labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "हिन्दी" => Ok(Language::Hindi),
            other => match other.to_lowercase().as_str() {
                "en" | "english" => Ok(Language::English),
                "hi" | "hindi" => Ok(Language::Hindi),
                _ => Err(DomainError::UnknownLanguage(s.to_string())),
            },
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One identify action's worth of input.
///
/// The image is guaranteed non-empty. Threshold and top-K are carried as
/// given; range enforcement is the host's job.
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    image: Vec<u8>,
    threshold: f64,
    top_k: u8,
    language: Language,
}

impl PredictionRequest {
    pub fn new(
        image: Vec<u8>,
        threshold: f64,
        top_k: u8,
        language: Language,
    ) -> Result<Self, DomainError> {
        if image.is_empty() {
            return Err(DomainError::EmptyImage);
        }
        Ok(Self {
            image,
            threshold,
            top_k,
            language,
        })
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn top_k(&self) -> u8 {
        self.top_k
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// HTTP method of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// The file part of a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: &'static str,
    pub filename: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Multipart form: scalar text fields plus a single file part.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    pub text_fields: Vec<(String, String)>,
    pub file: FilePart,
}

impl MultipartForm {
    /// Look up a text field by name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text_fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Multipart(MultipartForm),
}

/// Transport-agnostic description of one HTTP call.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: RequestBody,
    pub timeout: Duration,
}

/// Decimal text that always keeps a fractional part (`1.0`, not `1`).
fn format_threshold(threshold: f64) -> String {
    format!("{:?}", threshold)
}

/// Turns identify actions and catalog views into outbound calls.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    predict_timeout: Duration,
    catalog_timeout: Duration,
}

impl RequestBuilder {
    pub fn new(
        base_url: impl Into<String>,
        predict_timeout: Duration,
        catalog_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            predict_timeout,
            catalog_timeout,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            api.base_url.clone(),
            Duration::from_secs(api.predict_timeout_secs),
            Duration::from_secs(api.catalog_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/predict`. The base URL is an opaque prefix.
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// `{base_url}/breeds`.
    pub fn catalog_url(&self) -> String {
        format!("{}/breeds", self.base_url)
    }

    /// Build the multipart `POST /predict` call, consuming the request.
    pub fn predict(&self, request: PredictionRequest) -> OutboundRequest {
        let text_fields = vec![
            ("threshold".to_string(), format_threshold(request.threshold)),
            ("topk".to_string(), request.top_k.to_string()),
            ("lang".to_string(), request.language.code().to_string()),
        ];

        OutboundRequest {
            method: HttpMethod::Post,
            url: self.predict_url(),
            body: RequestBody::Multipart(MultipartForm {
                text_fields,
                file: FilePart {
                    field: IMAGE_FIELD,
                    filename: IMAGE_FILENAME,
                    content_type: IMAGE_CONTENT_TYPE,
                    bytes: request.image,
                },
            }),
            timeout: self.predict_timeout,
        }
    }

    /// Build the parameterless `GET /breeds` call.
    pub fn catalog(&self) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Get,
            url: self.catalog_url(),
            body: RequestBody::Empty,
            timeout: self.catalog_timeout,
        }
    }
}
