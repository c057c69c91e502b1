//! Normalizes backend responses into `PredictionResult` and `CatalogResult`.
//!
//! Interpretation never fails: transport failures and non-success statuses
//! become error states, and anything unexpected inside a successful body
//! degrades to absent fields.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::exchange::TransportOutcome;
use crate::domain::prediction::{
    BreedCatalog, BreedInfo, BreedPrediction, CatalogResult, ErrorInfo, PredictionResult,
};

/// Keys naming the headline prediction, in order of preference.
const SUGGESTION_KEYS: [&str; 2] = ["suggestion", "predicted_class"];
/// Keys naming the ranked list, in order of preference.
const RANKED_KEYS: [&str; 2] = ["topk", "predictions"];

/// Interpret the outcome of `POST /predict`.
pub fn interpret_prediction(outcome: TransportOutcome) -> PredictionResult {
    let response = match outcome {
        Ok(response) => response,
        Err(failure) => {
            warn!(
                timed_out = failure.timed_out,
                error = %failure.message,
                "Prediction request failed"
            );
            return PredictionResult::failed(ErrorInfo::network_failure(failure.message));
        }
    };

    if !response.is_success() {
        warn!(status = response.status, "Prediction service returned an error");
        return PredictionResult::failed(ErrorInfo::service_error(response.body));
    }

    let body = parse_body(&response.body);
    let Some(fields) = body.as_object() else {
        warn!("Prediction response is not a JSON object, treating as empty");
        return PredictionResult::default();
    };

    let suggestion = SUGGESTION_KEYS.iter().find_map(|key| text(fields.get(*key)));

    let predictions = RANKED_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_array))
        .map(|items| items.iter().filter_map(parse_prediction).collect())
        .unwrap_or_default();

    let breed_info = fields
        .get("breed_info")
        .and_then(Value::as_object)
        .filter(|info| !info.is_empty())
        .map(parse_breed_info);

    let confidence_message = text(fields.get("confidence_message"));

    let result =
        PredictionResult::content(suggestion, predictions, breed_info, confidence_message);
    debug!(
        suggestion = ?result.suggestion(),
        predictions = result.predictions().len(),
        has_breed_info = result.breed_info().is_some(),
        state = ?result.state(),
        "Prediction response interpreted"
    );
    result
}

/// Interpret the outcome of `GET /breeds`.
pub fn interpret_catalog(outcome: TransportOutcome) -> CatalogResult {
    let response = match outcome {
        Ok(response) => response,
        Err(failure) => {
            warn!(
                timed_out = failure.timed_out,
                error = %failure.message,
                "Catalog request failed"
            );
            return CatalogResult::Failed(ErrorInfo::network_failure(failure.message));
        }
    };

    if !response.is_success() {
        warn!(status = response.status, "Catalog service returned an error");
        return CatalogResult::Failed(ErrorInfo::service_error(response.body));
    }

    let entries = match parse_body(&response.body) {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| text(Some(&value)).map(|name| (key, name)))
            .collect(),
        _ => {
            warn!("Catalog response is not a JSON object, treating as empty");
            Vec::new()
        }
    };

    debug!(breeds = entries.len(), "Catalog response interpreted");
    CatalogResult::Listed(BreedCatalog::new(entries))
}

fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(error = %e, "Response body is not valid JSON");
        Value::Null
    })
}

/// Non-blank strings pass through and non-zero numbers are stringified.
/// Booleans, zero, null and structured values count as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Confidence as a finite number, or as a numeric string with an optional `%`.
fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn parse_prediction(item: &Value) -> Option<BreedPrediction> {
    let fields = item.as_object()?;
    let breed = text(fields.get("breed"));
    let confidence = number(fields.get("confidence"));
    match (breed, confidence) {
        (Some(breed), Some(confidence)) => Some(BreedPrediction::new(breed, confidence)),
        _ => {
            debug!(entry = %item, "Skipping malformed prediction entry");
            None
        }
    }
}

fn parse_breed_info(fields: &Map<String, Value>) -> BreedInfo {
    BreedInfo {
        display_name: text(fields.get("display_name")).or_else(|| text(fields.get("name"))),
        region: text(fields.get("region")).unwrap_or_default(),
        milk_yield: text(fields.get("milk_yield")).unwrap_or_default(),
        uses: text(fields.get("uses")).unwrap_or_default(),
        farmer_tip: text(fields.get("farmer_tip")),
    }
}
