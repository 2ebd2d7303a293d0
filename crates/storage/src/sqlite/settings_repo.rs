use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{ClientSettingsRepository, StorageError};
use cquizy_core::model::ClientSettings;

use super::SqliteRepository;

#[async_trait]
impl ClientSettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<ClientSettings>, StorageError> {
        let row = sqlx::query("SELECT server_url FROM client_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let server_url: Option<String> = row
            .try_get("server_url")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        ClientSettings::from_persisted(server_url)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_settings(&self, settings: &ClientSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO client_settings (id, server_url)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                server_url = excluded.server_url
            ",
        )
        .bind(1_i64)
        .bind(settings.server_url().map(|url| url.as_str().to_string()))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
