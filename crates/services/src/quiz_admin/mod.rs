//! Teacher-side supervision of a running quiz.

use std::sync::Arc;

use tracing::info;

use cquizy_core::model::{
    CheatEvent, EventId, QuizId, ResolveEvent, SubmissionRecord, sort_events,
};

use crate::api::QuizAdminApi;
use crate::error::ApiError;

mod monitor;

pub use monitor::{EVENT_POLL_PERIOD, EventMonitor, EventSnapshot};

#[derive(Clone)]
pub struct QuizAdminService {
    api: Arc<dyn QuizAdminApi>,
}

impl QuizAdminService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizAdminApi>) -> Self {
        Self { api }
    }

    /// Events of a quiz, active ones first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_events(&self, quiz_id: QuizId) -> Result<Vec<CheatEvent>, ApiError> {
        let mut events = self.api.list_events(quiz_id).await?;
        sort_events(&mut events);
        Ok(events)
    }

    /// Lift the lock a student is waiting on.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn unlock(&self, event_id: EventId) -> Result<(), ApiError> {
        self.api
            .resolve_event(event_id, &ResolveEvent::unlock())
            .await?;
        info!(%event_id, "event resolved, student unlocked");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_submissions(
        &self,
        quiz_id: QuizId,
    ) -> Result<Vec<SubmissionRecord>, ApiError> {
        self.api.list_submissions(quiz_id).await
    }

    /// Start refreshing the event list in the background.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn monitor(&self, quiz_id: QuizId) -> EventMonitor {
        EventMonitor::start(self.clone(), quiz_id)
    }
}
