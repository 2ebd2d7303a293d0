//! Shared error types for the services crate.

use thiserror::Error;

use cquizy_core::model::{AnswerError, ClientSettingsError, RegisterError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Shown when a failure has no message the user could act on.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Errors from talking to the cQuizy REST backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not logged in")]
    Unauthenticated,
    /// Non-2xx response; `detail` is the server's message or the reason phrase.
    #[error("{detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text fit for an alert: the server's own message when it sent one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            Self::Unauthenticated => self.to_string(),
            _ => UNEXPECTED_ERROR.to_string(),
        }
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,
    #[error(transparent)]
    Register(#[from] RegisterError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GroupService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroupError {
    #[error("invite code is required")]
    EmptyInviteCode,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by the quiz player.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("the quiz is no longer active")]
    Inactive,
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Settings(#[from] ClientSettingsError),
}
