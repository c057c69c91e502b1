//! Host-facing operations. Each returns plain data plus rendered lines so
//! any front end can display them.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::app::{AppController, IdentifyParams};
use crate::domain::{AppConfig, CatalogResult, DomainError, Language, PredictionResult};
use crate::presentation::{render_catalog, render_prediction, Notice};

/// Image types the picker accepts.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Per-action overrides of the configured identify parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamOverrides {
    pub threshold: Option<f64>,
    pub top_k: Option<u8>,
    pub language: Option<Language>,
}

impl ParamOverrides {
    pub fn apply(&self, mut params: IdentifyParams) -> IdentifyParams {
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(top_k) = self.top_k {
            params.top_k = top_k;
        }
        if let Some(language) = self.language {
            params.language = language;
        }
        params
    }
}

/// Result of an identify action.
#[derive(Serialize)]
pub struct IdentifyOutcome {
    pub result: PredictionResult,
    pub lines: Vec<Notice>,
}

/// Result of a breed listing.
#[derive(Serialize)]
pub struct BreedListing {
    pub result: CatalogResult,
    pub lines: Vec<Notice>,
}

/// Application paths information.
#[derive(Serialize)]
pub struct AppPaths {
    pub data_dir: String,
    pub logs_dir: String,
    pub config_path: String,
}

/// Read an image picked from disk.
pub fn load_image(path: &Path) -> Result<Vec<u8>, DomainError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DomainError::UnsupportedImage(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(DomainError::EmptyImage);
    }

    debug!(path = ?path, bytes = bytes.len(), "Image loaded");
    Ok(bytes)
}

/// Identify the breed in the image at `image_path`.
pub async fn identify_breed(
    controller: &AppController,
    image_path: &Path,
    overrides: ParamOverrides,
) -> Result<IdentifyOutcome, String> {
    let params = overrides.apply(controller.default_params());
    params.validate().map_err(|e| e.to_string())?;

    let image = load_image(image_path).map_err(|e| e.to_string())?;
    let result = controller
        .identify(image, &params)
        .await
        .map_err(|e| e.to_string())?;

    let lines = render_prediction(&result);
    Ok(IdentifyOutcome { result, lines })
}

/// List the breeds the service recognizes.
pub async fn list_breeds(controller: &AppController) -> BreedListing {
    let result = controller.list_breeds().await;
    let lines = render_catalog(&result);
    BreedListing { result, lines }
}

/// Get the current application configuration.
pub fn get_config(controller: &AppController) -> AppConfig {
    controller.config()
}

/// Update the application configuration.
pub fn update_config(controller: &AppController, config: AppConfig) -> Result<(), String> {
    controller.update_config(config).map_err(|e| e.to_string())
}

/// Get application paths information.
pub fn get_paths(controller: &AppController) -> AppPaths {
    AppPaths {
        data_dir: controller.data_dir(),
        logs_dir: controller.logs_dir(),
        config_path: controller.config_path(),
    }
}
