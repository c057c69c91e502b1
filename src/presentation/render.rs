//! Turns normalized results into the ordered lines a screen shows.

use std::fmt;

use serde::Serialize;

use crate::domain::{BreedInfo, CatalogResult, ErrorInfo, ErrorKind, PredictionResult};

pub const NO_SUGGESTION: &str = "No confident suggestion";
pub const NO_BREEDS: &str = "No breeds found";
pub const PHOTO_TIP: &str = "Tip: Take clear side & front photos for better accuracy.";

/// Visual weight of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Success,
    Warning,
    Info,
    Error,
    Heading,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tone {
            Tone::Success => write!(f, "[ok] {}", self.text),
            Tone::Warning => write!(f, "[!] {}", self.text),
            Tone::Info => write!(f, "[i] {}", self.text),
            Tone::Error => write!(f, "[error] {}", self.text),
            Tone::Heading => write!(f, "\n== {} ==", self.text),
            Tone::Plain => write!(f, "    {}", self.text),
        }
    }
}

fn failure(error: &ErrorInfo) -> Notice {
    match error.kind {
        ErrorKind::NetworkFailure => {
            Notice::new(Tone::Error, format!("Connection failed: {}", error.message))
        }
        ErrorKind::ServiceError => {
            Notice::new(Tone::Error, format!("API Error: {}", error.message))
        }
        ErrorKind::EmptyResult => Notice::new(Tone::Warning, NO_SUGGESTION),
    }
}

fn breed_card(info: &BreedInfo, lines: &mut Vec<Notice>) {
    lines.push(Notice::new(Tone::Heading, "Breed Information"));
    if let Some(name) = &info.display_name {
        lines.push(Notice::new(Tone::Plain, format!("Name: {}", name)));
    }
    lines.push(Notice::new(Tone::Plain, format!("Region: {}", info.region)));
    lines.push(Notice::new(Tone::Plain, format!("Milk Yield: {}", info.milk_yield)));
    lines.push(Notice::new(Tone::Plain, format!("Uses: {}", info.uses)));
    if let Some(tip) = &info.farmer_tip {
        lines.push(Notice::new(Tone::Info, format!("Farmer Tip: {}", tip)));
    }
}

/// Lines for an identify result: headline, guidance, ranked list, breed card.
/// A failed exchange renders as a single error line.
pub fn render_prediction(result: &PredictionResult) -> Vec<Notice> {
    if let Some(error) = result.error() {
        return vec![failure(error)];
    }

    let mut lines = Vec::new();

    match result.suggestion() {
        Some(breed) => lines.push(Notice::new(
            Tone::Success,
            format!("Suggested Breed: {}", breed),
        )),
        None => lines.push(Notice::new(Tone::Warning, NO_SUGGESTION)),
    }

    if let Some(message) = result.confidence_message() {
        lines.push(Notice::new(Tone::Info, message));
    }

    if !result.predictions().is_empty() {
        lines.push(Notice::new(Tone::Heading, "Prediction Confidence"));
        for prediction in result.predictions() {
            lines.push(Notice::new(
                Tone::Plain,
                format!("{} - {}%", prediction.breed_name, prediction.confidence_percent),
            ));
        }
    }

    if let Some(info) = result.breed_info() {
        breed_card(info, &mut lines);
    }

    lines
}

/// Lines for the breed listing.
pub fn render_catalog(result: &CatalogResult) -> Vec<Notice> {
    match result {
        CatalogResult::Failed(error) => vec![failure(error)],
        CatalogResult::Listed(catalog) if catalog.is_empty() => {
            vec![Notice::new(Tone::Info, NO_BREEDS)]
        }
        CatalogResult::Listed(catalog) => {
            let mut lines = vec![Notice::new(Tone::Heading, "Available Breeds")];
            lines.extend(
                catalog
                    .names()
                    .map(|name| Notice::new(Tone::Plain, format!("• {}", name))),
            );
            lines
        }
    }
}
