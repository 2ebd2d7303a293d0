use std::sync::Arc;

use tracing::info;

use cquizy_core::model::{
    Group, GroupId, GroupMember, JoinGroup, QuizAvailability, QuizSummary,
};

use crate::Clock;
use crate::api::GroupApi;
use crate::error::GroupError;

/// A group quiz together with whether it can be taken right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledQuiz {
    pub summary: QuizSummary,
    pub availability: QuizAvailability,
}

impl ScheduledQuiz {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.availability == QuizAvailability::Open
    }
}

#[derive(Clone)]
pub struct GroupService {
    clock: Clock,
    api: Arc<dyn GroupApi>,
}

impl GroupService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn GroupApi>) -> Self {
        Self { clock, api }
    }

    /// # Errors
    ///
    /// Returns `GroupError::Api` if the request fails.
    pub async fn list_groups(&self) -> Result<Vec<Group>, GroupError> {
        Ok(self.api.list_groups().await?)
    }

    /// Join a group by invite code.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::EmptyInviteCode` for a blank code, or
    /// `GroupError::Api` if the server rejects it.
    pub async fn join_group(&self, invite_code: &str) -> Result<Group, GroupError> {
        let invite_code = invite_code.trim();
        if invite_code.is_empty() {
            return Err(GroupError::EmptyInviteCode);
        }
        let group = self
            .api
            .join_group(&JoinGroup {
                invite_code: invite_code.to_string(),
            })
            .await?;
        info!(group_id = %group.id, "joined group");
        Ok(group)
    }

    /// Active members of a group, in the order the server ranks them.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::Api` if the request fails, including when the
    /// user is not a member.
    pub async fn list_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, GroupError> {
        Ok(self.api.list_members(group_id).await?)
    }

    /// Quizzes of a group, earliest start first.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::Api` if the request fails.
    pub async fn list_quizzes(&self, group_id: GroupId) -> Result<Vec<ScheduledQuiz>, GroupError> {
        let now = self.clock.now();
        let mut quizzes: Vec<ScheduledQuiz> = self
            .api
            .list_quizzes(group_id)
            .await?
            .into_iter()
            .map(|summary| ScheduledQuiz {
                availability: summary.availability(now),
                summary,
            })
            .collect();
        quizzes.sort_by_key(|quiz| quiz.summary.date_start);
        Ok(quizzes)
    }
}
