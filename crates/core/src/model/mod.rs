mod answer;
mod event;
mod group;
mod ids;
mod lock;
mod quiz;
mod result;
mod settings;
mod user;

pub use answer::{AnswerError, AnswerInput, AnswerSheet, BlockInput, Submission};
pub use event::{CheatEvent, EventStatus, ResolveEvent, UNLOCK_NOTE, sort_events};
pub use group::{Group, GroupMember, GroupRank, JoinGroup, MemberUser};
pub use ids::{BlockId, EventId, GroupId, ParseIdError, QuizId, SubmissionId, UserId};
pub use lock::{DEFAULT_LOCK_MESSAGE, EventKind, EventReport, LockReason, LockStatus};
pub use quiz::{
    ANTICHEAT_BADGE, Block, BlockKind, BlockOption, KIOSK_BADGE, QuizAvailability, QuizContent,
    QuizSummary,
};
pub use result::{QuizResult, SubmissionRecord};
pub use settings::{ClientSettings, ClientSettingsDraft, ClientSettingsError, parse_server_url};
pub use user::{
    LoginRequest, RegisterDraft, RegisterError, RegisterRequest, TokenResponse, UserProfile,
};
