use crate::credentials::{ApiKey, Credential, Provider};

/// Raw inputs as entered by the user during one session.
///
/// Nothing here is validated; the case builder defaults whatever is missing or malformed.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub symptoms: String,
    pub age: String,
    pub gender: String,
    /// Comma-separated past conditions
    pub medical_history: String,
    pub ai_enabled: bool,
    provider: Provider,
    api_key: ApiKey,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Change the selected provider. Always discards the held key, even when the
    /// same provider is re-selected, so a key is never reused for another provider.
    pub fn select_provider(&mut self, provider: Provider) {
        self.provider = provider;
        self.api_key.clear();
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn set_api_key(&mut self, key: impl Into<ApiKey>) {
        self.api_key = key.into();
    }

    /// Credential that a submission made right now would carry
    pub fn credential(&self) -> Credential {
        Credential::route(self.ai_enabled, self.provider, &self.api_key)
    }
}
