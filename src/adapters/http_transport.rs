use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::domain::request::{HttpMethod, MultipartForm, RequestBody};
use crate::domain::{DomainError, HttpResponse, OutboundRequest, TransportFailure, TransportOutcome};
use crate::ports::Transport;

/// Transport backed by a shared reqwest client.
///
/// Every completed response is returned as-is, whatever its status; only
/// failures to obtain a response become `TransportFailure`s.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("BreedLens/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpClient(format!("Failed to create HTTP client: {}", e)))?;

        info!("ReqwestTransport initialized");
        Ok(Self { client })
    }

    fn multipart(form: MultipartForm) -> Result<Form, reqwest::Error> {
        let file = form.file;
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(file.content_type)?;

        let mut multipart = Form::new();
        for (name, value) in form.text_fields {
            multipart = multipart.text(name, value);
        }
        Ok(multipart.part(file.field, part))
    }

    async fn execute(&self, request: OutboundRequest) -> Result<HttpResponse, reqwest::Error> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Multipart(form) => builder.multipart(Self::multipart(form)?),
        };

        let response = builder.timeout(request.timeout).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Error text including the underlying causes, e.g. the DNS or connect
/// error behind "error sending request".
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> TransportOutcome {
        let url = request.url.clone();
        let method = request.method;
        debug!(url = %url, method = ?method, timeout = ?request.timeout, "Sending request");

        match self.execute(request).await {
            Ok(response) => {
                info!(
                    url = %url,
                    status = response.status,
                    bytes = response.body.len(),
                    "Response received"
                );
                Ok(response)
            }
            Err(e) => {
                let message = describe(&e);
                warn!(url = %url, timed_out = e.is_timeout(), error = %message, "Request failed");
                if e.is_timeout() {
                    Err(TransportFailure::timeout(message))
                } else {
                    Err(TransportFailure::new(message))
                }
            }
        }
    }
}
