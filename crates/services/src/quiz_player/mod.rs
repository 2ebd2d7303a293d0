//! The quiz player: timer, focus watchdog, unlock poller and submission for
//! one running quiz.
//!
//! A [`QuizPlayer`] is a cheap handle over shared state. Background tasks only
//! hold weak references to it, so dropping the last handle (the quiz view
//! going away) cancels everything.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use cquizy_core::Clock;
use cquizy_core::countdown::CountdownDisplay;
use cquizy_core::model::{AnswerSheet, BlockId, QuizContent, QuizId, QuizResult};

use crate::api::QuizApi;
use crate::error::PlayerError;

mod poller;
mod submit;
mod task;
mod timer;
mod watchdog;

pub use submit::{SubmitMode, SubmitOutcome};
pub use task::RepeatingTask;
pub use watchdog::{FocusSignal, FocusSubscription};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const UNLOCK_POLL_PERIOD: Duration = Duration::from_secs(3);

pub const CONFIRM_SUBMIT_PROMPT: &str =
    "Are you sure you want to submit your answers? This cannot be undone.";
pub const TIME_UP_NOTICE: &str = "Time is up! Submitting your answers now.";
pub const UNLOCKED_NOTICE: &str = "The teacher has unlocked your test. You may continue.";

/// Everything the quiz view needs to react to, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Countdown(CountdownDisplay),
    /// Show the blocking overlay.
    LockShown,
    /// New text for the lock overlay while the lock persists.
    LockMessage(String),
    LockHidden,
    /// A one-off message for the user (alert).
    Notice(String),
    /// Ask the user to confirm a manual submission.
    ConfirmRequested(String),
    Submitting,
    SubmitFailed(String),
    Submitted(QuizResult),
}

pub type PlayerEvents = mpsc::UnboundedReceiver<PlayerEvent>;

struct PlayerInner {
    api: Arc<dyn QuizApi>,
    clock: Clock,
    quiz: QuizContent,
    answers: Mutex<AnswerSheet>,
    locked: AtomicBool,
    active: AtomicBool,
    submitting: AtomicBool,
    /// Time ran out while another request was in flight.
    forced_pending: AtomicBool,
    timer: RepeatingTask,
    poller: RepeatingTask,
    events: mpsc::UnboundedSender<PlayerEvent>,
}

impl PlayerInner {
    fn emit(&self, event: PlayerEvent) {
        // The view may already be gone; nothing left to tell.
        let _ = self.events.send(event);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    fn sheet(&self) -> MutexGuard<'_, AnswerSheet> {
        self.answers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Controller for one quiz attempt.
#[derive(Clone)]
pub struct QuizPlayer {
    inner: Arc<PlayerInner>,
}

impl QuizPlayer {
    /// Take ownership of a started quiz and arm the countdown.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn begin(api: Arc<dyn QuizApi>, clock: Clock, quiz: QuizContent) -> (Self, PlayerEvents) {
        let (events, rx) = mpsc::unbounded_channel();
        let inner = Arc::new(PlayerInner {
            api,
            clock,
            answers: Mutex::new(AnswerSheet::for_quiz(&quiz)),
            quiz,
            locked: AtomicBool::new(false),
            active: AtomicBool::new(true),
            submitting: AtomicBool::new(false),
            forced_pending: AtomicBool::new(false),
            timer: RepeatingTask::new(),
            poller: RepeatingTask::new(),
            events,
        });
        info!(
            quiz_id = %inner.quiz.id,
            anticheat = inner.quiz.anticheat_enabled,
            "quiz started"
        );
        timer::start_timer(&inner);
        (Self { inner }, rx)
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizContent {
        &self.inner.quiz
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.inner.quiz.id
    }

    /// Countdown state right now, for the first render before any tick.
    #[must_use]
    pub fn countdown(&self) -> CountdownDisplay {
        CountdownDisplay::from_remaining(self.inner.clock.until(self.inner.quiz.date_end))
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// False once the quiz was submitted or the view shut it down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.inner.submitting.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.inner.timer.is_running()
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.inner.poller.is_running()
    }

    /// Snapshot of the answers entered so far.
    #[must_use]
    pub fn answers(&self) -> AnswerSheet {
        self.inner.sheet().clone()
    }

    /// # Errors
    ///
    /// Returns `PlayerError::Inactive` after submission, or `PlayerError::Answer`
    /// when the block or option does not exist.
    pub fn select(&self, block_id: BlockId, value: &str) -> Result<(), PlayerError> {
        self.ensure_active()?;
        self.inner.sheet().select(block_id, value)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`QuizPlayer::select`].
    pub fn set_checked(&self, block_id: BlockId, value: &str, checked: bool) -> Result<(), PlayerError> {
        self.ensure_active()?;
        self.inner.sheet().set_checked(block_id, value, checked)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`QuizPlayer::select`].
    pub fn set_text(&self, block_id: BlockId, text: impl Into<String>) -> Result<(), PlayerError> {
        self.ensure_active()?;
        self.inner.sheet().set_text(block_id, text)?;
        Ok(())
    }

    /// Stop every background routine. Signals arriving afterwards are ignored.
    pub fn shutdown(&self) {
        if self.inner.active.swap(false, Ordering::SeqCst) {
            debug!(quiz_id = %self.inner.quiz.id, "quiz player shut down");
        }
        self.inner.timer.stop();
        self.inner.poller.stop();
    }

    fn ensure_active(&self) -> Result<(), PlayerError> {
        if self.inner.is_active() {
            Ok(())
        } else {
            Err(PlayerError::Inactive)
        }
    }
}

/// Fetches quiz content and hands out players for it.
#[derive(Clone)]
pub struct QuizPlayerService {
    api: Arc<dyn QuizApi>,
    clock: Clock,
}

impl QuizPlayerService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    /// Start the quiz on the server and arm a player for it.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Api` if the quiz cannot be started.
    pub async fn start(&self, quiz_id: QuizId) -> Result<(QuizPlayer, PlayerEvents), PlayerError> {
        let quiz = self.api.start_quiz(quiz_id).await?;
        Ok(QuizPlayer::begin(Arc::clone(&self.api), self.clock, quiz))
    }
}
