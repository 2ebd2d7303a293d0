use std::sync::Arc;

use tracing::info;
use url::Url;

use cquizy_core::model::ClientSettings;
use storage::repository::Storage;

use crate::Clock;
use crate::api::{ApiConfig, HttpApi};
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::group_service::GroupService;
use crate::quiz_admin::QuizAdminService;
use crate::quiz_player::QuizPlayerService;

/// Assembles app-facing services around one backend and one local store.
#[derive(Clone)]
pub struct AppServices {
    api_config: ApiConfig,
    auth: Arc<AuthService>,
    groups: Arc<GroupService>,
    quiz_player: Arc<QuizPlayerService>,
    quiz_admin: Arc<QuizAdminService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, api_config: ApiConfig, clock: Clock) -> Self {
        let api = Arc::new(HttpApi::new(
            api_config.clone(),
            Arc::clone(&storage.sessions),
        ));
        Self {
            auth: Arc::new(AuthService::new(
                clock,
                api.clone(),
                Arc::clone(&storage.sessions),
            )),
            groups: Arc::new(GroupService::new(clock, api.clone())),
            quiz_player: Arc::new(QuizPlayerService::new(api.clone(), clock)),
            quiz_admin: Arc::new(QuizAdminService::new(api)),
            api_config,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// An explicit server URL wins and is remembered for later runs; without
    /// one the saved URL, then `CQUIZY_SERVER_URL`, then the default is used.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or a
    /// configured URL is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        explicit_server: Option<ApiConfig>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        if let Some(config) = &explicit_server {
            storage
                .settings
                .save_settings(&ClientSettings::with_server_url(config.base_url().clone()))
                .await?;
        }
        let stored = storage.settings.get_settings().await?;
        let api_config = resolve_server_url(
            explicit_server,
            stored.as_ref().and_then(ClientSettings::server_url),
            ApiConfig::from_env()?,
        );
        info!(server = %api_config.base_url(), "using backend");
        Ok(Self::new(&storage, api_config, clock))
    }

    #[must_use]
    pub fn api_config(&self) -> &ApiConfig {
        &self.api_config
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn groups(&self) -> Arc<GroupService> {
        Arc::clone(&self.groups)
    }

    #[must_use]
    pub fn quiz_player(&self) -> Arc<QuizPlayerService> {
        Arc::clone(&self.quiz_player)
    }

    #[must_use]
    pub fn quiz_admin(&self) -> Arc<QuizAdminService> {
        Arc::clone(&self.quiz_admin)
    }
}

/// Pick the backend: explicit, then saved, then environment, then default.
#[must_use]
pub fn resolve_server_url(
    explicit: Option<ApiConfig>,
    stored: Option<&Url>,
    from_env: Option<ApiConfig>,
) -> ApiConfig {
    explicit
        .or_else(|| stored.cloned().map(ApiConfig::new))
        .or(from_env)
        .unwrap_or_default()
}
