//! HTTP client for the diagnosis service
//!
//! One `DiagnosisClient` is built per process from the resolved `Config`. Each submission
//! is a single POST to the analyze endpoint; there is no retry at this layer.

mod error;
mod interceptor;

pub use error::ClientError;
pub use interceptor::{Interceptor, JsonContent, UnauthorizedReporter};

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::case::ClinicalCase;
use crate::config::Config;
use crate::credentials::CredentialHeader;

/// Path of the case analysis endpoint
pub const ANALYZE_PATH: &str = "/api/v1/analyze";

/// Descriptor returned by the service root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Clone)]
pub struct DiagnosisClient {
    client: reqwest::Client,
    base_url: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for DiagnosisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.interceptors.iter().map(|i| i.name()).collect();
        f.debug_struct("DiagnosisClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &names)
            .finish()
    }
}

impl DiagnosisClient {
    /// Create a client with URL validation and the default interceptor chain
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = validate_base_url(&config.base_url)?;

        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::HttpClient)?;

        info!("DiagnosisClient created for {}", base_url);

        Ok(Self {
            client,
            base_url,
            interceptors: vec![Arc::new(JsonContent), Arc::new(UnauthorizedReporter)],
        })
    }

    /// Append an interceptor to the end of the chain
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    /// Submit a case for analysis.
    ///
    /// The success body is returned exactly as the service sent it, key order and number
    /// precision included. An empty success body is `Value::Null`.
    pub async fn analyze(
        &self,
        case: &ClinicalCase,
        credential: Option<&CredentialHeader>,
    ) -> Result<Value, ClientError> {
        let result = self.send_analyze(case, credential).await;
        if let Err(ref e) = result {
            for interceptor in &self.interceptors {
                interceptor.on_error(e);
            }
        }
        result
    }

    async fn send_analyze(
        &self,
        case: &ClinicalCase,
        credential: Option<&CredentialHeader>,
    ) -> Result<Value, ClientError> {
        let mut builder = self.client.post(self.analyze_url()).json(case);

        if let Some(header) = credential {
            let mut value = HeaderValue::from_str(header.value.expose())
                .map_err(|_| ClientError::InvalidHeader(header.name))?;
            value.set_sensitive(true);
            builder = builder.header(header.name, value);
        }

        let mut request = builder.build()?;
        for interceptor in &self.interceptors {
            interceptor.on_request(&mut request)?;
        }

        info!(
            "Submitting case {} (provider key: {})",
            case.case_id,
            credential.map(|h| h.name).unwrap_or("none")
        );

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = error::extract_detail(&body);
            warn!("Diagnosis service returned {} for case {}", status, case.case_id);
            return Err(ClientError::Status { status, detail });
        }

        let diagnosis: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&body)?
        };
        debug!("Case {} analyzed ({} bytes)", case.case_id, body.len());

        for interceptor in &self.interceptors {
            interceptor.on_response(status, &diagnosis);
        }

        Ok(diagnosis)
    }

    /// Fetch the service descriptor from the root path
    pub async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        let url = format!("{}/", self.base_url);
        let mut request = self.client.get(&url).build()?;
        for interceptor in &self.interceptors {
            interceptor.on_request(&mut request)?;
        }

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                detail: error::extract_detail(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Trim the trailing slash and reject anything that is not a plain http(s) URL
fn validate_base_url(base_url: &str) -> Result<String, ClientError> {
    let cleaned = base_url.trim().trim_end_matches('/');

    let parsed = reqwest::Url::parse(cleaned)
        .map_err(|e| ClientError::InvalidUrl(format!("'{}': {}", cleaned, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "must use http or https scheme, got: {}",
            parsed.scheme()
        )));
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(ClientError::InvalidUrl(
            "must not contain credentials".to_string(),
        ));
    }

    Ok(cleaned.to_string())
}
