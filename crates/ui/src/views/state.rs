use dioxus::prelude::*;

use services::{ApiError, AuthError, GroupError, PlayerError, UNEXPECTED_ERROR};

/// A failure a page can show in place of its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// No stored session, or the server rejected the token.
    Unauthenticated,
    /// A message fit to show as-is.
    Message(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated => "Please log in to continue.",
            Self::Message(message) => message,
            Self::Unknown => UNEXPECTED_ERROR,
        }
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthenticated => Self::Unauthenticated,
            ApiError::Status { status, .. } if status.as_u16() == 401 => Self::Unauthenticated,
            other => Self::Message(other.user_message()),
        }
    }
}

impl From<GroupError> for ViewError {
    fn from(err: GroupError) -> Self {
        match err {
            GroupError::Api(api) => api.into(),
            other => Self::Message(other.to_string()),
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api(api) => api.into(),
            AuthError::Storage(_) => Self::Unknown,
            other => Self::Message(other.to_string()),
        }
    }
}

impl From<PlayerError> for ViewError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::Api(api) => api.into(),
            other => Self::Message(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_asks_for_login() {
        let err = ApiError::Status {
            status: services::api::StatusCode::UNAUTHORIZED,
            detail: "Invalid token".into(),
        };
        assert_eq!(ViewError::from(err), ViewError::Unauthenticated);
    }

    #[test]
    fn server_detail_is_shown() {
        let err = ApiError::Status {
            status: services::api::StatusCode::BAD_REQUEST,
            detail: "Invalid invite code".into(),
        };
        assert_eq!(ViewError::from(GroupError::Api(err)).message(), "Invalid invite code");
    }
}
