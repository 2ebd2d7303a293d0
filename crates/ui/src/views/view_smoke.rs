use storage::repository::SessionRepository;

use super::test_harness::{GROUP_ID, QUIZ_ID, ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn login_view_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("login-username"), "missing username field in {html}");
    assert!(html.contains("login-password"), "missing password field in {html}");
    assert!(harness.sessions.load_session().await.unwrap().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn groups_view_lists_groups_with_invite_code_for_admins() {
    let mut harness = setup_view_harness(ViewKind::Groups, true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Biology 10.A"), "missing group name in {html}");
    assert!(html.contains("Invite code: BIO10A"), "missing invite code in {html}");
    assert!(html.contains("Join a group"), "missing join form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn group_view_links_open_quiz_and_monitor() {
    let mut harness = setup_view_harness(ViewKind::Group(GROUP_ID), true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Photosynthesis"), "missing quiz in {html}");
    assert!(html.contains("Open"), "missing status in {html}");
    assert!(html.contains("Start"), "missing start link in {html}");
    assert!(html.contains("Monitor"), "missing admin link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn group_view_lists_members_with_rank() {
    let mut harness = setup_view_harness(ViewKind::Group(GROUP_ID), true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Members"), "missing members section in {html}");
    assert!(html.contains("Dori"), "missing nickname in {html}");
    assert!(html.contains("bence"), "missing username fallback in {html}");
    assert!(html.contains("(Admin)"), "missing admin rank in {html}");
    assert!(html.contains("(Member)"), "missing member rank in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_shows_profile_of_signed_in_user() {
    let mut harness = setup_view_harness(ViewKind::Sidebar, true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Signed in as Dori"), "missing nickname in {html}");
    assert!(
        html.contains("https://cdn.example.com/dora.png"),
        "missing profile picture in {html}"
    );
    assert!(html.contains("Log out"), "missing logout in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_offers_login_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Sidebar, false).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Log in"), "missing login link in {html}");
    assert!(!html.contains("Signed in as"), "unexpected user in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_without_session_reports_invalid_access() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QUIZ_ID), false).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Invalid access. Please ensure you are logged in and using a valid link."),
        "missing invalid access message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_header_and_ordered_blocks() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QUIZ_ID), true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Photosynthesis"), "missing title in {html}");
    assert!(html.contains("🔒 Anti-Cheat Active"), "missing anticheat badge in {html}");
    assert!(html.contains("📱 Kiosk Mode"), "missing kiosk badge in {html}");
    assert!(html.contains("00:45:00"), "missing countdown in {html}");
    assert!(html.contains("Attached Resource Link"), "missing link in {html}");
    assert!(html.contains("Submit Answers"), "missing submit button in {html}");

    let first = html
        .find("1. Where does photosynthesis happen?")
        .expect("first question");
    let second = html
        .find("2. Describe the light reactions")
        .expect("second question");
    assert!(first < second, "blocks out of order in {html}");
    assert!(harness.backend.submissions.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_admin_view_shows_locked_students_and_submissions() {
    let mut harness = setup_view_harness(ViewKind::QuizAdmin(QUIZ_ID), true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Dora Nagy"), "missing student in {html}");
    assert!(html.contains("Locked students: 1"), "missing active count in {html}");
    assert!(html.contains("Unlock"), "missing unlock button in {html}");
    assert!(html.contains("92.5%"), "missing submission in {html}");
    assert!(
        html.contains("(No grade assigned for this percentage)"),
        "missing grade notice in {html}"
    );
}
