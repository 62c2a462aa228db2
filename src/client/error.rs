use reqwest::StatusCode;
use serde_json::Value;

/// Errors raised by the diagnosis service client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid diagnosis service URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error("Credential is not a valid value for header {0}")]
    InvalidHeader(&'static str),

    #[error("Request interceptor {name} failed: {reason}")]
    Interceptor { name: &'static str, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Diagnosis service returned {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Failed to parse diagnosis response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status reported by the server, if the request got that far
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Human-readable message supplied by the server in its `detail` field
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Pull a readable message out of an error body.
///
/// Accepts `{"detail": "..."}` and the validation shape
/// `{"detail": [{"msg": "..."}, ...]}`. Anything else yields `None`.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    match json.get("detail")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.trim().is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
