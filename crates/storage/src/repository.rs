use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cquizy_core::model::ClientSettings;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The bearer token of the logged-in user, kept on this machine between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub username: String,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    #[must_use]
    pub fn new(token: impl Into<String>, username: impl Into<String>, saved_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            saved_at,
        }
    }
}

/// Repository contract for the persisted login session.
///
/// At most one session is stored; saving replaces the previous one.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_session(&self) -> Result<Option<StoredSession>, StorageError>;

    /// Persist a session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save_session(&self, session: &StoredSession) -> Result<(), StorageError>;

    /// Remove the stored session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ClientSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be read or no longer validate.
    async fn get_settings(&self) -> Result<Option<ClientSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be stored.
    async fn save_settings(&self, settings: &ClientSettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    session: Arc<Mutex<Option<StoredSession>>>,
    settings: Arc<Mutex<Option<ClientSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<StoredSession>, StorageError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_session(&self, session: &StoredSession) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[async_trait]
impl ClientSettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<ClientSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &ClientSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates client-side repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
    pub settings: Arc<dyn ClientSettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn ClientSettingsRepository> = Arc::new(repo);
        Self { sessions, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cquizy_core::model::parse_server_url;
    use cquizy_core::time::fixed_now;

    #[tokio::test]
    async fn save_replaces_previous_session() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.load_session().await.unwrap(), None);

        repo.save_session(&StoredSession::new("t1", "ann", fixed_now()))
            .await
            .unwrap();
        repo.save_session(&StoredSession::new("t2", "bob", fixed_now()))
            .await
            .unwrap();

        let loaded = repo.load_session().await.unwrap().unwrap();
        assert_eq!(loaded.token, "t2");
        assert_eq!(loaded.username, "bob");
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let repo = InMemoryRepository::new();
        repo.clear_session().await.unwrap();
        repo.save_session(&StoredSession::new("t", "ann", fixed_now()))
            .await
            .unwrap();
        repo.clear_session().await.unwrap();
        repo.clear_session().await.unwrap();
        assert_eq!(repo.load_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn storage_in_memory_shares_one_backend() {
        let storage = Storage::in_memory();
        let url = parse_server_url("http://localhost:8000").unwrap();
        storage
            .settings
            .save_settings(&ClientSettings::with_server_url(url.clone()))
            .await
            .unwrap();
        let loaded = storage.settings.get_settings().await.unwrap().unwrap();
        assert_eq!(loaded.server_url(), Some(&url));
    }
}
