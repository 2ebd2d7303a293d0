use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use cquizy_core::model::{
    CheatEvent, EventId, EventReport, Group, GroupId, GroupMember, JoinGroup, LockStatus,
    LoginRequest, QuizContent, QuizId, QuizResult, QuizSummary, RegisterRequest, ResolveEvent,
    Submission, SubmissionRecord, TokenResponse, UserProfile,
};
use storage::repository::SessionRepository;

use super::{ApiConfig, AuthApi, GroupApi, QuizAdminApi, QuizApi};
use crate::error::ApiError;

/// Whether a request carries the stored bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// reqwest-backed client for the cQuizy backend.
///
/// The bearer token is read from the session repository on every request, so
/// logging in or out takes effect without rebuilding the client.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
    sessions: Arc<dyn SessionRepository>,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            client: Client::new(),
            config,
            sessions,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.config.endpoint(path)?;
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match auth {
            Auth::Anonymous => Ok(builder),
            Auth::Bearer => {
                let session = self
                    .sessions
                    .load_session()
                    .await?
                    .ok_or(ApiError::Unauthenticated)?;
                Ok(builder.bearer_auth(session.token))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .request(Method::GET, path, Auth::Bearer)
            .await?
            .send()
            .await?;
        decode(expect_success(response).await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, auth)
            .await?
            .json(body)
            .send()
            .await?;
        decode(expect_success(response).await?).await
    }

    /// POST where the response body is irrelevant.
    async fn post_unit<B>(&self, path: &str, body: Option<&B>, auth: Auth) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let mut builder = self.request(Method::POST, path, auth).await?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        expect_success(builder.send().await?).await?;
        Ok(())
    }
}

async fn expect_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(%status, "api request failed");
    Err(ApiError::Status {
        status,
        detail: error_detail(status, &body),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Human-readable failure text: the `detail` field when the body carries one,
/// otherwise the raw body, otherwise the status reason phrase.
fn error_detail(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map_or_else(|| status.as_u16().to_string(), str::to_string)
    };
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
            Some(Value::Null) | None => Value::Object(map).to_string(),
            Some(Value::String(_)) => fallback(),
            Some(other) => other.to_string(),
        },
        Ok(Value::Null) => fallback(),
        Ok(other) => other.to_string(),
        Err(_) if body.trim().is_empty() => fallback(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl QuizApi for HttpApi {
    async fn start_quiz(&self, quiz_id: QuizId) -> Result<QuizContent, ApiError> {
        self.get_json(&format!("api/quizzes/{quiz_id}/start")).await
    }

    async fn report_event(&self, report: &EventReport) -> Result<(), ApiError> {
        self.post_unit("api/quizzes/events", Some(report), Auth::Bearer)
            .await
    }

    async fn lock_status(&self, quiz_id: QuizId) -> Result<LockStatus, ApiError> {
        self.get_json(&format!("api/quizzes/{quiz_id}/lock-status"))
            .await
    }

    async fn submit(&self, submission: &Submission) -> Result<QuizResult, ApiError> {
        self.post_json("api/quizzes/submit", submission, Auth::Bearer)
            .await
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.post_json("api/users/login", request, Auth::Anonymous)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_unit("api/users/register", Some(request), Auth::Anonymous)
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post_unit::<Value>("api/users/logout", None, Auth::Bearer)
            .await
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("api/users/me").await
    }
}

#[async_trait]
impl GroupApi for HttpApi {
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get_json("api/groups/").await
    }

    async fn join_group(&self, request: &JoinGroup) -> Result<Group, ApiError> {
        self.post_json("api/groups/join", request, Auth::Bearer)
            .await
    }

    async fn list_quizzes(&self, group_id: GroupId) -> Result<Vec<QuizSummary>, ApiError> {
        self.get_json(&format!("api/quizzes/group/{group_id}"))
            .await
    }

    async fn list_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, ApiError> {
        self.get_json(&format!("api/groups/{group_id}/members"))
            .await
    }
}

#[async_trait]
impl QuizAdminApi for HttpApi {
    async fn list_events(&self, quiz_id: QuizId) -> Result<Vec<CheatEvent>, ApiError> {
        self.get_json(&format!("api/quizzes/events/{quiz_id}"))
            .await
    }

    async fn resolve_event(&self, event_id: EventId, body: &ResolveEvent) -> Result<(), ApiError> {
        self.post_unit(
            &format!("api/quizzes/events/{event_id}"),
            Some(body),
            Auth::Bearer,
        )
        .await
    }

    async fn list_submissions(&self, quiz_id: QuizId) -> Result<Vec<SubmissionRecord>, ApiError> {
        self.get_json(&format!("api/quizzes/{quiz_id}/submissions"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    #[test]
    fn detail_string_is_preferred() {
        let detail = error_detail(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Quiz has already ended"}"#,
        );
        assert_eq!(detail, "Quiz has already ended");
    }

    #[test]
    fn structured_detail_is_stringified() {
        let detail = error_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"msg": "field required"}]}"#,
        );
        assert_eq!(detail, r#"[{"msg":"field required"}]"#);
    }

    #[test]
    fn body_without_detail_is_stringified() {
        let detail = error_detail(StatusCode::BAD_REQUEST, r#"{"error": "nope"}"#);
        assert_eq!(detail, r#"{"error":"nope"}"#);
    }

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        assert_eq!(
            error_detail(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(error_detail(StatusCode::FORBIDDEN, "  "), "Forbidden");
    }

    #[test]
    fn plain_text_body_is_kept() {
        assert_eq!(
            error_detail(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
    }

    #[tokio::test]
    async fn bearer_request_without_session_is_unauthenticated() {
        let api = HttpApi::new(ApiConfig::default(), Arc::new(InMemoryRepository::new()));
        let err = api.lock_status(QuizId::new(1)).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
