use serde::Serialize;

/// One entry of the ranked confidence list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedPrediction {
    pub breed_name: String,
    /// Confidence as reported by the service, in percent (0-100).
    pub confidence_percent: f64,
}

impl BreedPrediction {
    pub fn new(breed_name: impl Into<String>, confidence_percent: f64) -> Self {
        Self {
            breed_name: breed_name.into(),
            confidence_percent,
        }
    }
}

/// Reference information about the suggested breed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreedInfo {
    /// `display_name`, else `name`, else absent.
    pub display_name: Option<String>,
    pub region: String,
    pub milk_yield: String,
    pub uses: String,
    pub farmer_tip: Option<String>,
}

/// Failure and degenerate-result classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The transport could not complete: timeout, refused connection, DNS.
    NetworkFailure,
    /// The service answered with a non-success status.
    ServiceError,
    /// The service answered successfully but with nothing actionable.
    /// Not a failure; rendered as a neutral notice.
    EmptyResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn network_failure(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NetworkFailure,
            message: message.into(),
        }
    }

    pub fn service_error(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ServiceError,
            message: message.into(),
        }
    }
}

/// Coarse view of a `PredictionResult` for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultState {
    /// At least one of suggestion, predictions or breed info is present.
    Content,
    /// Successful exchange without actionable content.
    Empty,
    /// The exchange failed.
    Failed(ErrorKind),
}

impl ResultState {
    /// Flatten to an error kind. `Empty` maps to `EmptyResult`.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ResultState::Content => None,
            ResultState::Empty => Some(ErrorKind::EmptyResult),
            ResultState::Failed(kind) => Some(*kind),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ResultState::Failed(_))
    }
}

/// Normalized outcome of one identify action.
///
/// Either `error` is set and every content field is empty, or `error` is
/// absent. Constructed only through [`PredictionResult::failed`] and
/// [`PredictionResult::content`], which uphold that.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionResult {
    suggestion: Option<String>,
    predictions: Vec<BreedPrediction>,
    breed_info: Option<BreedInfo>,
    confidence_message: Option<String>,
    error: Option<ErrorInfo>,
}

impl PredictionResult {
    pub fn failed(error: ErrorInfo) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn content(
        suggestion: Option<String>,
        predictions: Vec<BreedPrediction>,
        breed_info: Option<BreedInfo>,
        confidence_message: Option<String>,
    ) -> Self {
        Self {
            suggestion,
            predictions,
            breed_info,
            confidence_message,
            error: None,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Ranked predictions in the order the service returned them.
    pub fn predictions(&self) -> &[BreedPrediction] {
        &self.predictions
    }

    pub fn breed_info(&self) -> Option<&BreedInfo> {
        self.breed_info.as_ref()
    }

    pub fn confidence_message(&self) -> Option<&str> {
        self.confidence_message.as_deref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn state(&self) -> ResultState {
        if let Some(error) = &self.error {
            return ResultState::Failed(error.kind);
        }
        if self.suggestion.is_none() && self.predictions.is_empty() && self.breed_info.is_none() {
            ResultState::Empty
        } else {
            ResultState::Content
        }
    }
}

/// Breed listing in the order the service sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreedCatalog {
    entries: Vec<(String, String)>,
}

impl BreedCatalog {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Display names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// Normalized outcome of a catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CatalogResult {
    /// Possibly empty; an empty catalog is not an error.
    Listed(BreedCatalog),
    Failed(ErrorInfo),
}

impl CatalogResult {
    pub fn catalog(&self) -> Option<&BreedCatalog> {
        match self {
            CatalogResult::Listed(catalog) => Some(catalog),
            CatalogResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            CatalogResult::Listed(_) => None,
            CatalogResult::Failed(error) => Some(error),
        }
    }
}
