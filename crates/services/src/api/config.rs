use std::env;

use cquizy_core::model::{ClientSettingsError, parse_server_url};
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const SERVER_URL_ENV: &str = "CQUIZY_SERVER_URL";

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// The base path always ends with `/` so endpoint paths join beneath it.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url }
    }

    /// Read `CQUIZY_SERVER_URL`, if set and non-blank.
    ///
    /// # Errors
    ///
    /// Returns `ClientSettingsError` when the variable holds an invalid URL.
    pub fn from_env() -> Result<Option<Self>, ClientSettingsError> {
        match env::var(SERVER_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Ok(Some(Self::new(parse_server_url(&raw)?))),
            _ => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `ClientSettingsError` for an invalid URL.
    pub fn parse(raw: &str) -> Result<Self, ClientSettingsError> {
        Ok(Self::new(parse_server_url(raw)?))
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns `url::ParseError` if `path` cannot be joined onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::parse(DEFAULT_SERVER_URL).unwrap_or_else(|_| unreachable!("default URL is valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_under_base_path() {
        let config = ApiConfig::parse("https://school.example.com/cquizy").unwrap();
        assert_eq!(
            config.endpoint("/api/quizzes/3/start").unwrap().as_str(),
            "https://school.example.com/cquizy/api/quizzes/3/start"
        );
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("api/groups/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/groups/"
        );
    }
}
