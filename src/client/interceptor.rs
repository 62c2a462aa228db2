//! Hooks run around every call made by `DiagnosisClient`
//!
//! Interceptors are global to a client and run in registration order. They may adjust an
//! outgoing request or abort it, but they only observe responses and errors.

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Request, StatusCode};
use serde_json::Value;
use tracing::warn;

use super::error::ClientError;

pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before the request is sent. An error aborts the call.
    fn on_request(&self, _request: &mut Request) -> Result<(), ClientError> {
        Ok(())
    }

    /// Called with a successful response body. The body is returned to the caller unchanged.
    fn on_response(&self, _status: StatusCode, _body: &Value) {}

    /// Called with any failure before it is returned to the caller
    fn on_error(&self, _error: &ClientError) {}
}

/// Marks every request and expected response as JSON
#[derive(Debug, Default)]
pub struct JsonContent;

impl Interceptor for JsonContent {
    fn name(&self) -> &'static str {
        "json-content"
    }

    fn on_request(&self, request: &mut Request) -> Result<(), ClientError> {
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(())
    }
}

/// Reports rejected credentials. The error itself is left untouched.
#[derive(Debug, Default)]
pub struct UnauthorizedReporter;

impl Interceptor for UnauthorizedReporter {
    fn name(&self) -> &'static str {
        "unauthorized-reporter"
    }

    fn on_error(&self, error: &ClientError) {
        if error.is_unauthorized() {
            warn!(
                "Diagnosis service rejected the request as unauthorized: {}",
                error.detail().unwrap_or("no detail")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request() -> Request {
        Request::new(
            Method::POST,
            reqwest::Url::parse("http://localhost:8000/api/v1/analyze").unwrap(),
        )
    }

    #[test]
    fn test_json_content_sets_headers() {
        let mut req = request();
        JsonContent.on_request(&mut req).unwrap();
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_default_hooks_pass_through() {
        let mut req = request();
        UnauthorizedReporter.on_request(&mut req).unwrap();
        assert!(req.headers().is_empty());

        // Observing an error must not panic or alter anything
        UnauthorizedReporter.on_error(&ClientError::Status {
            status: StatusCode::UNAUTHORIZED,
            detail: None,
        });
    }
}
