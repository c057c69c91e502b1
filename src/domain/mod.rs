pub mod config;
pub mod error;
pub mod exchange;
pub mod interpreter;
pub mod prediction;
pub mod request;
pub mod session;

pub use config::AppConfig;
pub use error::DomainError;
pub use exchange::{HttpResponse, TransportFailure, TransportOutcome};
pub use interpreter::{interpret_catalog, interpret_prediction};
pub use prediction::{
    BreedCatalog, BreedInfo, BreedPrediction, CatalogResult, ErrorInfo, ErrorKind,
    PredictionResult, ResultState,
};
pub use request::{Language, OutboundRequest, PredictionRequest, RequestBuilder};
pub use session::{AtomicIdentifyState, IdentifyState};
