use serde::{Deserialize, Serialize};

use crate::domain::config::PredictionConfig;
use crate::domain::{DomainError, Language};

/// Accepted confidence threshold range.
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;
/// Accepted top-K range.
pub const TOP_K_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// User-chosen parameters for one identify action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentifyParams {
    pub threshold: f64,
    pub top_k: u8,
    pub language: Language,
}

impl IdentifyParams {
    /// Reject values a picker would never offer. The request builder itself
    /// forwards whatever it is given.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !THRESHOLD_RANGE.contains(&self.threshold) {
            return Err(DomainError::InvalidParameter {
                name: "threshold",
                reason: format!("{} is outside 0.0-1.0", self.threshold),
            });
        }
        if !TOP_K_RANGE.contains(&self.top_k) {
            return Err(DomainError::InvalidParameter {
                name: "topk",
                reason: format!("{} is outside 1-5", self.top_k),
            });
        }
        Ok(())
    }
}

impl From<&PredictionConfig> for IdentifyParams {
    fn from(config: &PredictionConfig) -> Self {
        Self {
            threshold: config.threshold,
            top_k: config.top_k,
            language: config.language,
        }
    }
}

impl Default for IdentifyParams {
    fn default() -> Self {
        Self::from(&PredictionConfig::default())
    }
}
