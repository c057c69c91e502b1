#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod presentation;

pub use app::{AppController, IdentifyParams};
pub use domain::{
    interpret_catalog, interpret_prediction, BreedCatalog, BreedInfo, BreedPrediction,
    CatalogResult, DomainError, ErrorInfo, ErrorKind, Language, PredictionRequest,
    PredictionResult, RequestBuilder, ResultState,
};
