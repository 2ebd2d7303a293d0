use std::sync::Arc;

use tracing::{info, warn};

use cquizy_core::model::{LoginRequest, RegisterDraft, UserProfile};
use storage::repository::{SessionRepository, StoredSession};

use crate::Clock;
use crate::api::AuthApi;
use crate::error::{ApiError, AuthError};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const INVALID_ACCESS: &str =
    "Invalid access. Please ensure you are logged in and using a valid link.";

/// Login state of this client, backed by the session repository.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    api: Arc<dyn AuthApi>,
    sessions: Arc<dyn SessionRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn AuthApi>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            clock,
            api,
            sessions,
        }
    }

    /// Log in and remember the returned token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input,
    /// `AuthError::Api` when the server refuses, or `AuthError::Storage` if
    /// the token cannot be saved.
    pub async fn login(&self, username: &str, password: &str) -> Result<StoredSession, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token = self.api.login(&request).await?;
        let session = StoredSession::new(token.token, username, self.clock.now());
        self.sessions.save_session(&session).await?;
        info!(%username, "logged in");
        Ok(session)
    }

    /// Create an account. The user still has to log in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Register` if the form is incomplete, or
    /// `AuthError::Api` when the server refuses.
    pub async fn register(&self, draft: RegisterDraft) -> Result<(), AuthError> {
        let request = draft.validate()?;
        self.api.register(&request).await?;
        info!(username = %request.username, "registered");
        Ok(())
    }

    /// Tell the server (best effort) and forget the local session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        match self.api.logout().await {
            Ok(()) | Err(ApiError::Unauthenticated) => {}
            Err(err) => warn!(error = %err, "server logout failed"),
        }
        self.sessions.clear_session().await?;
        info!("logged out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session store cannot be read.
    pub async fn current_session(&self) -> Result<Option<StoredSession>, AuthError> {
        Ok(self.sessions.load_session().await?)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Api` if the profile cannot be fetched.
    pub async fn profile(&self) -> Result<UserProfile, AuthError> {
        Ok(self.api.me().await?)
    }
}

/// Alert text for a failed login.
#[must_use]
pub fn login_failure_message(err: &AuthError) -> String {
    match err {
        AuthError::Api(ApiError::Status { detail, .. }) if !detail.trim().is_empty() => {
            detail.clone()
        }
        AuthError::MissingCredentials => err.to_string(),
        _ => LOGIN_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn login_message_prefers_server_detail() {
        let err = AuthError::Api(ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            detail: "Incorrect username or password".into(),
        });
        assert_eq!(login_failure_message(&err), "Incorrect username or password");
    }

    #[test]
    fn login_message_falls_back() {
        let err = AuthError::Api(ApiError::Decode("eof".into()));
        assert_eq!(login_failure_message(&err), LOGIN_FAILED);
    }
}
