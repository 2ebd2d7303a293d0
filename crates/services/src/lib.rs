#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod group_service;
pub mod quiz_admin;
pub mod quiz_player;

pub use cquizy_core::Clock;

pub use api::{ApiConfig, AuthApi, GroupApi, HttpApi, QuizAdminApi, QuizApi};
pub use app_services::AppServices;
pub use auth_service::{AuthService, INVALID_ACCESS, LOGIN_FAILED, login_failure_message};
pub use error::{
    ApiError, AppServicesError, AuthError, GroupError, PlayerError, UNEXPECTED_ERROR,
};
pub use group_service::{GroupService, ScheduledQuiz};
pub use quiz_admin::{EventMonitor, EventSnapshot, QuizAdminService};
pub use quiz_player::{
    FocusSignal, FocusSubscription, PlayerEvent, PlayerEvents, QuizPlayer, QuizPlayerService,
    RepeatingTask, SubmitMode, SubmitOutcome,
};
