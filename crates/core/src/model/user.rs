use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegisterError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("email address is not valid")]
    InvalidEmail,
}

/// Body of `POST /api/users/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Unvalidated registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub username: String,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub pfp_url: String,
}

/// Body of `POST /api/users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub nickname: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub pfp_url: Option<String>,
}

impl RegisterDraft {
    /// Validate required fields and normalize optional ones.
    ///
    /// # Errors
    ///
    /// Returns `RegisterError` if a required field is blank or the email is malformed.
    pub fn validate(self) -> Result<RegisterRequest, RegisterError> {
        let username = required(self.username, "username")?;
        let first_name = required(self.first_name, "first name")?;
        let last_name = required(self.last_name, "last name")?;
        let email = required(self.email, "email")?;
        if self.password.is_empty() {
            return Err(RegisterError::MissingField("password"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(RegisterError::InvalidEmail),
        }

        Ok(RegisterRequest {
            username,
            nickname: normalize_optional(self.nickname),
            first_name,
            last_name,
            email,
            password: self.password,
            pfp_url: normalize_optional(self.pfp_url),
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, RegisterError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegisterError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The logged-in user as returned by `GET /api/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub pfp_url: String,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl UserProfile {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|nick| !nick.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RegisterDraft {
        RegisterDraft {
            username: " kata ".into(),
            nickname: "  ".into(),
            first_name: "Kata".into(),
            last_name: "Kovacs".into(),
            email: "kata@example.com".into(),
            password: "secret".into(),
            pfp_url: String::new(),
        }
    }

    #[test]
    fn validate_trims_and_drops_blank_optionals() {
        let request = draft().validate().unwrap();
        assert_eq!(request.username, "kata");
        assert_eq!(request.nickname, None);
        assert_eq!(request.pfp_url, None);
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let mut missing = draft();
        missing.last_name = " ".into();
        assert_eq!(
            missing.validate(),
            Err(RegisterError::MissingField("last name"))
        );

        let mut no_password = draft();
        no_password.password.clear();
        assert_eq!(
            no_password.validate(),
            Err(RegisterError::MissingField("password"))
        );
    }

    #[test]
    fn validate_rejects_bad_email() {
        let mut bad = draft();
        bad.email = "kata.example.com".into();
        assert_eq!(bad.validate(), Err(RegisterError::InvalidEmail));
    }

    #[test]
    fn display_name_prefers_nickname() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": 1, "username": "kata", "email": "k@e.com", "first_name": "K",
                "last_name": "K", "nickname": "Kat", "pfp_url": "", "date_joined": null}"#,
        )
        .unwrap();
        assert_eq!(profile.display_name(), "Kat");
    }
}
