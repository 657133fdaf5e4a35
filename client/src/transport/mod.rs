//! HTTP boundary of the submission pipeline.
//!
//! The pipeline only ever sees a [`FormSubmissionRequest`] going out and an
//! [`HttpResponse`] (or a [`TransportError`]) coming back. Concrete
//! transports live behind the [`Transport`] trait:
//!
//! - [`http::ReqwestTransport`] - native builds (`native` feature)
//! - the browser frontend provides its own `gloo-net` implementation
//!
//! The trait uses `async fn` without `Send` bounds so browser futures, which
//! are not `Send`, can implement it too.

#[cfg(feature = "native")]
pub mod http;

use serde_json::Value;

use crate::error::TransportResult;

/// HTTP methods used by the accounts API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// One outgoing request. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmissionRequest {
    pub method: HttpMethod,
    /// Absolute URL.
    pub endpoint: String,
    /// JSON body, if any.
    pub payload: Option<Value>,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl FormSubmissionRequest {
    /// New request carrying the fixed `Content-Type: application/json` header.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            payload: None,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// Attach a JSON body.
    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Add `Authorization: Bearer <token>` when a token is present.
    pub fn with_bearer(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token {
            self.headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Serialized body.
    pub fn body(&self) -> Option<String> {
        self.payload.as_ref().map(Value::to_string)
    }
}

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body parsed as JSON; `Null` when empty or not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Sends a request and resolves with a response or a transport failure.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &FormSubmissionRequest) -> TransportResult<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: &FormSubmissionRequest) -> TransportResult<HttpResponse> {
        (**self).send(request).await
    }
}
