//! Provider credential routing
//!
//! A user may supply their own key for one of two AI providers. The key travels to the
//! diagnosis service as a single provider-specific request header, and only when AI
//! assistance is switched on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Header carrying an OpenAI key
pub const PRIMARY_KEY_HEADER: &str = "X-OpenAI-Key";

/// Header carrying an OpenRouter key
pub const SECONDARY_KEY_HEADER: &str = "X-OpenRouter-Key";

/// AI provider the user's credential belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI
    #[default]
    Primary,
    /// OpenRouter
    Secondary,
}

impl Provider {
    /// Name of the request header that carries this provider's key
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::Primary => PRIMARY_KEY_HEADER,
            Self::Secondary => SECONDARY_KEY_HEADER,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Primary => "OpenAI",
            Self::Secondary => "OpenRouter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "openai" => Ok(Self::Primary),
            "secondary" | "openrouter" => Ok(Self::Secondary),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// User-supplied API key. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// The credential that will accompany a submission, if any.
///
/// At most one provider can be represented, so a request can never carry both keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    #[default]
    None,
    Primary(ApiKey),
    Secondary(ApiKey),
}

/// One header name/value pair added to the outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHeader {
    pub name: &'static str,
    pub value: ApiKey,
}

impl Credential {
    /// Collapse the form's (enabled, provider, key) triple into a credential.
    ///
    /// Disabled AI or an empty key yields `Credential::None`. The key is passed through
    /// verbatim; its format is not checked here.
    pub fn route(ai_enabled: bool, provider: Provider, key: &ApiKey) -> Self {
        if !ai_enabled || key.is_empty() {
            return Self::None;
        }
        match provider {
            Provider::Primary => Self::Primary(key.clone()),
            Provider::Secondary => Self::Secondary(key.clone()),
        }
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            Self::None => None,
            Self::Primary(_) => Some(Provider::Primary),
            Self::Secondary(_) => Some(Provider::Secondary),
        }
    }

    /// The augmentation header for this credential
    pub fn header(&self) -> Option<CredentialHeader> {
        let (provider, key) = match self {
            Self::None => return None,
            Self::Primary(key) => (Provider::Primary, key),
            Self::Secondary(key) => (Provider::Secondary, key),
        };
        Some(CredentialHeader {
            name: provider.header_name(),
            value: key.clone(),
        })
    }
}
