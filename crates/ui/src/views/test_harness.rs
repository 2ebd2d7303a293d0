use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use cquizy_core::model::{
    Block, BlockId, BlockKind, BlockOption, CheatEvent, EventId, EventKind, EventReport,
    EventStatus, Group, GroupId, GroupMember, GroupRank, JoinGroup, LockStatus, LoginRequest,
    MemberUser, QuizContent, QuizId, QuizResult, QuizSummary, RegisterRequest, ResolveEvent,
    Submission, SubmissionRecord, SubmissionId, TokenResponse, UserId, UserProfile,
};
use cquizy_core::time::fixed_now;
use services::{
    ApiError, AuthApi, AuthService, Clock, GroupApi, GroupService, QuizAdminApi,
    QuizAdminService, QuizApi, QuizPlayerService,
};
use storage::repository::{InMemoryRepository, SessionRepository, StoredSession};

use crate::context::{UiApp, build_app_context};
use crate::routes::Sidebar;
use crate::views::{GroupView, GroupsView, LoginView, QuizAdminView, QuizView};

/// Canned backend shared by every view test.
#[derive(Default)]
pub struct FakeBackend {
    pub submissions: Mutex<Vec<Submission>>,
}

pub const QUIZ_ID: u64 = 7;
pub const GROUP_ID: u64 = 3;

pub fn sample_quiz() -> QuizContent {
    QuizContent {
        id: QuizId::new(QUIZ_ID),
        title: "Photosynthesis".into(),
        desc: Some("Chapter 4".into()),
        anticheat_enabled: true,
        kiosk_enabled: true,
        date_end: fixed_now() + Duration::minutes(45),
        blocks: vec![
            Block {
                id: BlockId::new(2),
                order: 2,
                kind: BlockKind::Text,
                question: "Describe the light reactions".into(),
                subtext: None,
                image_url: None,
                link_url: None,
                answers: Vec::new(),
            },
            Block {
                id: BlockId::new(1),
                order: 1,
                kind: BlockKind::SingleChoice,
                question: "Where does photosynthesis happen?".into(),
                subtext: Some("Pick one".into()),
                image_url: None,
                link_url: Some("https://example.com/leaf".into()),
                answers: vec![
                    BlockOption {
                        id: 1,
                        text: "Chloroplast".into(),
                    },
                    BlockOption {
                        id: 2,
                        text: "Nucleus".into(),
                    },
                ],
            },
        ],
    }
}

#[async_trait]
impl QuizApi for FakeBackend {
    async fn start_quiz(&self, quiz_id: QuizId) -> Result<QuizContent, ApiError> {
        Ok(QuizContent {
            id: quiz_id,
            ..sample_quiz()
        })
    }

    async fn report_event(&self, _report: &EventReport) -> Result<(), ApiError> {
        Ok(())
    }

    async fn lock_status(&self, _quiz_id: QuizId) -> Result<LockStatus, ApiError> {
        Ok(LockStatus {
            is_locked: false,
            active_event_id: None,
            message: None,
        })
    }

    async fn submit(&self, submission: &Submission) -> Result<QuizResult, ApiError> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(QuizResult {
            id: Some(SubmissionId::new(1)),
            percentage: 80.0,
            grade_value: Some("4".into()),
            date_submitted: fixed_now(),
            group_id: Some(GroupId::new(GROUP_ID)),
        })
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        Ok(TokenResponse {
            token: format!("t-{}", request.username),
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            id: UserId::new(11),
            username: "dora".into(),
            email: "dora@example.com".into(),
            first_name: "Dora".into(),
            last_name: "Nagy".into(),
            nickname: Some("Dori".into()),
            pfp_url: "https://cdn.example.com/dora.png".into(),
            date_joined: None,
        })
    }
}

#[async_trait]
impl GroupApi for FakeBackend {
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        Ok(vec![Group {
            id: GroupId::new(GROUP_ID),
            name: "Biology 10.A".into(),
            date_created: fixed_now(),
            invite_code: "BIO10A".into(),
            rank: GroupRank::Admin,
            anticheat: true,
            kiosk: false,
        }])
    }

    async fn join_group(&self, _request: &JoinGroup) -> Result<Group, ApiError> {
        Err(ApiError::Unauthenticated)
    }

    async fn list_quizzes(&self, _group_id: GroupId) -> Result<Vec<QuizSummary>, ApiError> {
        Ok(vec![QuizSummary {
            id: QuizId::new(QUIZ_ID),
            project_name: "Photosynthesis".into(),
            group_name: "Biology 10.A".into(),
            date_start: fixed_now() - Duration::minutes(10),
            date_end: fixed_now() + Duration::minutes(45),
        }])
    }

    async fn list_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, ApiError> {
        let member = |id: u64, username: &str, nickname: Option<&str>, rank| GroupMember {
            user: MemberUser {
                id: UserId::new(id),
                username: username.into(),
                nickname: nickname.map(str::to_string),
                pfp_url: String::new(),
            },
            rank,
            group_id: Some(group_id),
            date_joined: None,
        };
        Ok(vec![
            member(11, "dora", Some("Dori"), GroupRank::Admin),
            member(12, "bence", None, GroupRank::Member),
        ])
    }
}

#[async_trait]
impl QuizAdminApi for FakeBackend {
    async fn list_events(&self, _quiz_id: QuizId) -> Result<Vec<CheatEvent>, ApiError> {
        Ok(vec![CheatEvent {
            id: EventId::new(9),
            student_name: "Dora Nagy".into(),
            kind: EventKind::TabSwitch,
            status: EventStatus::Active,
            created_at: "2023-11-14T22:10:00Z".into(),
        }])
    }

    async fn resolve_event(&self, _event_id: EventId, _body: &ResolveEvent) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_submissions(&self, _quiz_id: QuizId) -> Result<Vec<SubmissionRecord>, ApiError> {
        Ok(vec![SubmissionRecord {
            id: SubmissionId::new(1),
            student_name: "Dora Nagy".into(),
            quiz_project: "Photosynthesis".into(),
            percentage: 92.5,
            grade_value: None,
            date_submitted: fixed_now(),
        }])
    }
}

struct TestApp {
    auth: Arc<AuthService>,
    groups: Arc<GroupService>,
    quiz_player: Arc<QuizPlayerService>,
    quiz_admin: Arc<QuizAdminService>,
}

impl UiApp for TestApp {
    fn server_label(&self) -> String {
        "http://test.invalid/".into()
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn groups(&self) -> Arc<GroupService> {
        Arc::clone(&self.groups)
    }

    fn quiz_player(&self) -> Arc<QuizPlayerService> {
        Arc::clone(&self.quiz_player)
    }

    fn quiz_admin(&self) -> Arc<QuizAdminService> {
        Arc::clone(&self.quiz_admin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Groups,
    Group(u64),
    Quiz(u64),
    QuizAdmin(u64),
    Sidebar,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Groups => rsx! { GroupsView {} },
        ViewKind::Group(group_id) => rsx! { GroupView { group_id } },
        ViewKind::Quiz(quiz_id) => rsx! { QuizView { quiz_id } },
        ViewKind::QuizAdmin(quiz_id) => rsx! { QuizAdminView { quiz_id } },
        ViewKind::Sidebar => rsx! { Sidebar {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<FakeBackend>,
    pub sessions: Arc<InMemoryRepository>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Let spawned futures and resources make progress, then re-render.
    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, logged_in: bool) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let backend = Arc::new(FakeBackend::default());
    let sessions = Arc::new(InMemoryRepository::new());
    if logged_in {
        sessions
            .save_session(&StoredSession::new("t-dora", "dora", fixed_now()))
            .await
            .expect("save session");
    }

    let app = Arc::new(TestApp {
        auth: Arc::new(AuthService::new(clock, backend.clone(), sessions.clone())),
        groups: Arc::new(GroupService::new(clock, backend.clone())),
        quiz_player: Arc::new(QuizPlayerService::new(backend.clone(), clock)),
        quiz_admin: Arc::new(QuizAdminService::new(backend.clone())),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness {
        dom,
        backend,
        sessions,
    }
}
