//! Native transport built on `reqwest`.

use std::time::Duration;

use crate::error::{TransportError, TransportResult};

use super::{FormSubmissionRequest, HttpMethod, HttpResponse, Transport};

/// `reqwest`-backed [`Transport`] with a fixed request timeout.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &FormSubmissionRequest) -> TransportResult<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.endpoint);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body);
        }

        log::debug!("{} {}", request.method.as_str(), request.endpoint);
        let response = builder.send().await.map_err(classify_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_error)?;
        log::debug!("{} {} -> {}", request.method.as_str(), request.endpoint, status);

        Ok(HttpResponse { status, body })
    }
}

/// Split `reqwest` failures into "never answered" and "could not even ask".
fn classify_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Client(err.to_string())
    } else if err.is_connect() || err.is_timeout() || err.is_request() {
        TransportError::NoResponse(err.to_string())
    } else {
        TransportError::Client(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn forgot_password(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        assert_eq!(headers["content-type"], "application/json");
        if body["email"] == "known@geoflip.io" {
            (StatusCode::OK, Json(json!({"message": "sent"})))
        } else {
            (StatusCode::NOT_FOUND, Json(json!({"message": "User not found"})))
        }
    }

    async fn resend(headers: HeaderMap) -> StatusCode {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer tok") => StatusCode::OK,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/accounts/user/forgot-password", post(forgot_password))
            .route("/accounts/user/resend-verification", post(resend));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_sends_json_body_and_reads_status() {
        let base = spawn_server().await;
        let request = FormSubmissionRequest::new(HttpMethod::Post, format!("{}/accounts/user/forgot-password", base))
            .with_payload(Some(json!({"email": "known@geoflip.io"})));

        let response = transport().send(&request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.json()["message"], "sent");

        let request = request.with_payload(Some(json!({"email": "nobody@geoflip.io"})));
        let response = transport().send(&request).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.json()["message"], "User not found");
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let base = spawn_server().await;
        let url = format!("{}/accounts/user/resend-verification", base);

        let with_token = FormSubmissionRequest::new(HttpMethod::Post, &url).with_bearer(Some("tok"));
        assert_eq!(transport().send(&with_token).await.unwrap().status, 200);

        let without = FormSubmissionRequest::new(HttpMethod::Post, &url);
        assert_eq!(transport().send(&without).await.unwrap().status, 401);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_no_response() {
        // Grab a free port, then close it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = FormSubmissionRequest::new(HttpMethod::Post, format!("http://{}/accounts/user/login", addr));
        let err = transport().send(&request).await.unwrap_err();
        assert!(matches!(err, TransportError::NoResponse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_malformed_url_is_client_error() {
        let request = FormSubmissionRequest::new(HttpMethod::Post, "not a url");
        let err = transport().send(&request).await.unwrap_err();
        assert!(matches!(err, TransportError::Client(_)), "got {:?}", err);
    }
}
