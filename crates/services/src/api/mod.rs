//! REST collaborators of the client.
//!
//! Each trait covers one backend router so services and tests can depend on
//! the narrowest surface they need. `HttpApi` implements all of them.

use async_trait::async_trait;

use cquizy_core::model::{
    CheatEvent, EventId, EventReport, Group, GroupId, GroupMember, JoinGroup, LockStatus,
    LoginRequest, QuizContent, QuizId, QuizResult, QuizSummary, RegisterRequest, ResolveEvent,
    Submission, SubmissionRecord, TokenResponse, UserProfile,
};

use crate::error::ApiError;

mod config;
mod http;

pub use config::{ApiConfig, DEFAULT_SERVER_URL, SERVER_URL_ENV};
pub use http::HttpApi;
pub use reqwest::StatusCode;

/// Student-side quiz endpoints used by the quiz player.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `GET /api/quizzes/{id}/start`
    async fn start_quiz(&self, quiz_id: QuizId) -> Result<QuizContent, ApiError>;

    /// `POST /api/quizzes/events`
    async fn report_event(&self, report: &EventReport) -> Result<(), ApiError>;

    /// `GET /api/quizzes/{id}/lock-status`
    async fn lock_status(&self, quiz_id: QuizId) -> Result<LockStatus, ApiError>;

    /// `POST /api/quizzes/submit`
    async fn submit(&self, submission: &Submission) -> Result<QuizResult, ApiError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn me(&self) -> Result<UserProfile, ApiError>;
}

#[async_trait]
pub trait GroupApi: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError>;
    async fn join_group(&self, request: &JoinGroup) -> Result<Group, ApiError>;
    async fn list_quizzes(&self, group_id: GroupId) -> Result<Vec<QuizSummary>, ApiError>;
    /// `GET /api/groups/{id}/members`
    async fn list_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, ApiError>;
}

/// Teacher-side endpoints for supervising a running quiz.
#[async_trait]
pub trait QuizAdminApi: Send + Sync {
    async fn list_events(&self, quiz_id: QuizId) -> Result<Vec<CheatEvent>, ApiError>;
    async fn resolve_event(&self, event_id: EventId, body: &ResolveEvent) -> Result<(), ApiError>;
    async fn list_submissions(&self, quiz_id: QuizId) -> Result<Vec<SubmissionRecord>, ApiError>;
}
