use dioxus::document;
use dioxus::prelude::*;
use dioxus_router::Link;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use cquizy_core::countdown::CountdownDisplay;
use cquizy_core::model::{BlockId, DEFAULT_LOCK_MESSAGE, QuizId};
use services::{
    FocusSignal, FocusSubscription, INVALID_ACCESS, PlayerError, PlayerEvent, QuizPlayer,
    SubmitMode,
};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{AnswerChange, BlockVm, ResultVm, map_blocks};

mod components;
mod scripts;

use components::{ConfirmModal, CountdownBadge, LockOverlay, NoticeBanner, QuestionBlock, ResultCard};
use scripts::{focus_watcher_script, focus_watcher_teardown_script};

#[derive(Clone, Debug, PartialEq)]
enum QuizPhase {
    Loading,
    Running,
    Failed(String),
    Finished(ResultVm),
}

#[derive(Clone, Debug, PartialEq)]
struct QuizHeader {
    title: String,
    desc: Option<String>,
    badges: String,
}

#[component]
pub fn QuizView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_id = QuizId::new(quiz_id);

    let mut phase = use_signal(|| QuizPhase::Loading);
    let mut player = use_signal(|| None::<QuizPlayer>);
    let mut quiz_header = use_signal(|| None::<QuizHeader>);
    let mut blocks = use_signal(Vec::<BlockVm>::new);
    let mut countdown = use_signal(|| None::<CountdownDisplay>);
    let mut lock_message = use_signal(|| None::<String>);
    let mut confirm_prompt = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);

    let auth = ctx.auth();
    let quiz_player = ctx.quiz_player();
    use_future(move || {
        let auth = auth.clone();
        let quiz_player = quiz_player.clone();
        async move {
            if !matches!(auth.current_session().await, Ok(Some(_))) {
                phase.set(QuizPhase::Failed(INVALID_ACCESS.to_string()));
                return;
            }
            let (started, mut events) = match quiz_player.start(quiz_id).await {
                Ok(started) => started,
                Err(err) => {
                    warn!(%quiz_id, error = %err, "failed to start quiz");
                    phase.set(QuizPhase::Failed(ViewError::from(err).message().to_string()));
                    return;
                }
            };

            let quiz = started.quiz();
            quiz_header.set(Some(QuizHeader {
                title: quiz.title.clone(),
                desc: quiz.desc.clone().filter(|desc| !desc.trim().is_empty()),
                badges: quiz.mode_badges().join(" "),
            }));
            blocks.set(map_blocks(quiz, &started.answers()));
            countdown.set(Some(started.countdown()));
            let _subscription = watch_focus(&started);
            player.set(Some(started));
            phase.set(QuizPhase::Running);

            while let Some(event) = events.recv().await {
                match event {
                    PlayerEvent::Countdown(display) => countdown.set(Some(display)),
                    PlayerEvent::LockShown => {
                        lock_message.set(Some(DEFAULT_LOCK_MESSAGE.to_string()));
                    }
                    PlayerEvent::LockMessage(message) => lock_message.set(Some(message)),
                    PlayerEvent::LockHidden => lock_message.set(None),
                    PlayerEvent::Notice(message) => notice.set(Some(message)),
                    PlayerEvent::ConfirmRequested(prompt) => confirm_prompt.set(Some(prompt)),
                    PlayerEvent::Submitting => {
                        confirm_prompt.set(None);
                        submitting.set(true);
                    }
                    PlayerEvent::SubmitFailed(message) => {
                        submitting.set(false);
                        notice.set(Some(message));
                    }
                    PlayerEvent::Submitted(result) => {
                        submitting.set(false);
                        lock_message.set(None);
                        confirm_prompt.set(None);
                        phase.set(QuizPhase::Finished(ResultVm::from_result(&result)));
                        if let Some(script) = end_attempt(player.peek().as_ref()) {
                            let _ = document::eval(script);
                        }
                        break;
                    }
                }
            }
        }
    });

    use_drop(move || {
        if let Ok(current) = player.try_peek() {
            // Navigating away keeps the webview alive, so its listeners must go too.
            if let Some(script) = end_attempt(current.as_ref()) {
                let _ = document::eval(script);
            }
        }
    });

    let answer = use_callback(move |(block_id, change): (BlockId, AnswerChange)| {
        let Some(current) = player.peek().clone() else {
            return;
        };
        let result = match change {
            AnswerChange::Select(value) => current.select(block_id, &value),
            AnswerChange::Toggle { value, checked } => current.set_checked(block_id, &value, checked),
            AnswerChange::Text(text) => current.set_text(block_id, text),
        };
        match result {
            Ok(()) => blocks.set(map_blocks(current.quiz(), &current.answers())),
            Err(err) => warn!(%block_id, error = %err, "answer rejected"),
        }
    });

    let submit = move |mode: SubmitMode| {
        let Some(current) = player.peek().clone() else {
            return;
        };
        spawn(async move {
            match current.submit(mode).await {
                Ok(outcome) => debug!(?outcome, "submit finished"),
                // Already surfaced through `PlayerEvent::SubmitFailed`.
                Err(PlayerError::Api(_)) => {}
                Err(err) => notice.set(Some(ViewError::from(err).message().to_string())),
            }
        });
    };

    let decline = move |()| {
        if let Some(current) = player.peek().as_ref() {
            current.decline_submit();
        }
        confirm_prompt.set(None);
    };

    rsx! {
        div { class: "page quiz-page",
            match phase() {
                QuizPhase::Loading => rsx! {
                    p { id: "loading-message", "Loading quiz..." }
                },
                QuizPhase::Failed(message) => rsx! {
                    div { id: "loading-message",
                        h3 { class: "error", "{message}" }
                        Link { class: "back-btn", to: Route::Groups {}, "Go Back" }
                    }
                },
                QuizPhase::Finished(result) => rsx! {
                    ResultCard { result }
                },
                QuizPhase::Running => rsx! {
                    header { class: "quiz-header",
                        if let Some(info) = quiz_header() {
                            div {
                                h1 { id: "quiz-title", "{info.title}" }
                                span { id: "quiz-mode-badge", class: "mode-badge", "{info.badges}" }
                                if let Some(desc) = info.desc {
                                    p { class: "quiz-desc", "{desc}" }
                                }
                            }
                        }
                        if let Some(display) = countdown() {
                            CountdownBadge { display }
                        }
                    }
                    div { id: "questions-container",
                        for block in blocks() {
                            QuestionBlock {
                                key: "{block.id}",
                                block: block.clone(),
                                disabled: submitting(),
                                on_change: move |change| answer.call((block.id, change)),
                            }
                        }
                    }
                    button {
                        id: "submit-quiz",
                        class: "primary",
                        disabled: submitting(),
                        onclick: move |_| submit(SubmitMode::Manual),
                        if submitting() { "Submitting..." } else { "Submit Answers" }
                    }
                },
            }
            if let Some(message) = lock_message() {
                LockOverlay { message }
            }
            if let Some(prompt) = confirm_prompt() {
                ConfirmModal {
                    prompt,
                    on_confirm: move |()| {
                        confirm_prompt.set(None);
                        submit(SubmitMode::Confirmed);
                    },
                    on_cancel: decline,
                }
            }
            if let Some(message) = notice() {
                NoticeBanner { message, on_dismiss: move |()| notice.set(None) }
            }
        }
    }
}

/// Stop the player and hand back the script that removes the webview focus
/// listeners, if any were installed for this quiz.
fn end_attempt(player: Option<&QuizPlayer>) -> Option<&'static str> {
    let player = player?;
    player.shutdown();
    player
        .quiz()
        .anticheat_enabled
        .then(focus_watcher_teardown_script)
}

/// Hook the webview's focus events up to the player's lockout logic.
fn watch_focus(player: &QuizPlayer) -> Option<FocusSubscription> {
    let (tx, rx) = mpsc::unbounded_channel();
    let subscription = player.watch_focus(rx)?;
    let mut watcher = document::eval(focus_watcher_script());
    spawn(async move {
        while let Ok(name) = watcher.recv::<String>().await {
            let Some(signal) = FocusSignal::from_name(&name) else {
                continue;
            };
            if tx.send(signal).is_err() {
                break;
            }
        }
    });
    Some(subscription)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cquizy_core::model::QuizContent;
    use cquizy_core::time::fixed_clock;

    use super::*;
    use crate::views::test_harness::{FakeBackend, sample_quiz};

    fn player_for(quiz: QuizContent) -> QuizPlayer {
        let (player, _events) = QuizPlayer::begin(Arc::new(FakeBackend::default()), fixed_clock(), quiz);
        player
    }

    #[tokio::test(flavor = "current_thread")]
    async fn leaving_an_anticheat_quiz_stops_the_player_and_removes_listeners() {
        let player = player_for(sample_quiz());
        assert!(player.is_timer_running());

        let script = end_attempt(Some(&player)).expect("listeners were installed");
        assert!(script.contains("removeEventListener(\"blur\""));
        assert!(script.contains("removeEventListener(\"visibilitychange\""));
        assert!(!player.is_active());
        assert!(!player.is_timer_running());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn leaving_without_anticheat_needs_no_script() {
        let mut quiz = sample_quiz();
        quiz.anticheat_enabled = false;
        let player = player_for(quiz);

        assert!(end_attempt(Some(&player)).is_none());
        assert!(!player.is_active());
        assert!(end_attempt(None).is_none());
    }
}
