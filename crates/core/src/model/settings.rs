use thiserror::Error;
use url::Url;

/// Client-side settings persisted next to the session token.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClientSettings {
    server_url: Option<Url>,
}

#[derive(Clone, Debug, Default)]
pub struct ClientSettingsDraft {
    pub server_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientSettingsError {
    #[error("invalid server URL: {0}")]
    InvalidServerUrl(String),
}

impl ClientSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientSettingsError` if the server URL is present but is not an
    /// absolute http(s) URL.
    pub fn validate(self) -> Result<ClientSettings, ClientSettingsError> {
        let server_url = match normalize_optional(self.server_url) {
            Some(raw) => Some(parse_server_url(&raw)?),
            None => None,
        };
        Ok(ClientSettings { server_url })
    }
}

impl ClientSettings {
    /// Rehydrate settings from storage.
    ///
    /// # Errors
    ///
    /// Returns `ClientSettingsError` if the stored URL no longer parses.
    pub fn from_persisted(server_url: Option<String>) -> Result<Self, ClientSettingsError> {
        ClientSettingsDraft { server_url }.validate()
    }

    #[must_use]
    pub fn with_server_url(server_url: Url) -> Self {
        Self {
            server_url: Some(server_url),
        }
    }

    #[must_use]
    pub fn server_url(&self) -> Option<&Url> {
        self.server_url.as_ref()
    }
}

/// Parse a backend base URL, accepting only http and https.
///
/// # Errors
///
/// Returns `ClientSettingsError::InvalidServerUrl` for anything else.
pub fn parse_server_url(raw: &str) -> Result<Url, ClientSettingsError> {
    let url = Url::parse(raw.trim())
        .map_err(|_| ClientSettingsError::InvalidServerUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ClientSettingsError::InvalidServerUrl(raw.to_string())),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
