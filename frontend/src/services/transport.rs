//! Browser transport over `fetch`, via `gloo-net`.

use geoflip_client::transport::{FormSubmissionRequest, HttpMethod, HttpResponse, Transport};
use geoflip_client::{TransportError, TransportResult};
use gloo_net::http::Request;

/// [`Transport`] for the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: &FormSubmissionRequest) -> TransportResult<HttpResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.endpoint),
            HttpMethod::Post => Request::post(&request.endpoint),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let outgoing = match request.body() {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Client(format!("Failed to build request: {}", e)))?;

        log::debug!("{} {}", request.method.as_str(), request.endpoint);
        let response = outgoing.send().await.map_err(classify_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Client(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

/// A rejected `fetch` (offline, CORS, aborted) never produced a response.
fn classify_error(err: gloo_net::Error) -> TransportError {
    match err {
        gloo_net::Error::JsError(e) => TransportError::NoResponse(e.to_string()),
        other => TransportError::Client(other.to_string()),
    }
}
