use async_trait::async_trait;

use crate::domain::{OutboundRequest, TransportOutcome};

/// Port for sending outbound calls to the inference service.
///
/// Implementations never fail in any other way than returning a
/// `TransportFailure`: a response with any status code is a completed
/// exchange and must be returned with its body text.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response or failure, honoring the
    /// request's timeout.
    async fn send(&self, request: OutboundRequest) -> TransportOutcome;
}
