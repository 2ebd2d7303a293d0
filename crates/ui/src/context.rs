use std::sync::Arc;

use services::{AuthService, GroupService, QuizAdminService, QuizPlayerService};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn server_label(&self) -> String;

    fn auth(&self) -> Arc<AuthService>;
    fn groups(&self) -> Arc<GroupService>;
    fn quiz_player(&self) -> Arc<QuizPlayerService>;
    fn quiz_admin(&self) -> Arc<QuizAdminService>;
}

#[derive(Clone)]
pub struct AppContext {
    server_label: String,
    auth: Arc<AuthService>,
    groups: Arc<GroupService>,
    quiz_player: Arc<QuizPlayerService>,
    quiz_admin: Arc<QuizAdminService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            server_label: app.server_label(),
            auth: app.auth(),
            groups: app.groups(),
            quiz_player: app.quiz_player(),
            quiz_admin: app.quiz_admin(),
        }
    }

    #[must_use]
    pub fn server_label(&self) -> &str {
        &self.server_label
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
