use std::sync::atomic::Ordering;

use tracing::{debug, info, warn};

use cquizy_core::model::QuizResult;

use super::{CONFIRM_SUBMIT_PROMPT, PlayerEvent, QuizPlayer};
use crate::error::PlayerError;

/// How a submission was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// The student pressed submit; confirmation is still needed.
    Manual,
    /// The student confirmed the prompt.
    Confirmed,
    /// The timer ran out; no confirmation.
    Forced,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(QuizResult),
    /// A [`PlayerEvent::ConfirmRequested`] was emitted; call `submit` again with
    /// [`SubmitMode::Confirmed`] or [`QuizPlayer::decline_submit`].
    AwaitingConfirmation,
    Cancelled,
}

impl QuizPlayer {
    /// Submit the collected answers.
    ///
    /// On success the player becomes inactive and every background routine
    /// stops. On failure the player stays active so the student can retry.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Inactive` once the quiz is over,
    /// `PlayerError::AlreadySubmitting` while a request is in flight, and
    /// `PlayerError::Api` when the server rejects the submission.
    pub async fn submit(&self, mode: SubmitMode) -> Result<SubmitOutcome, PlayerError> {
        let inner = &self.inner;
        if !inner.is_active() {
            return Err(PlayerError::Inactive);
        }
        if self.is_submitting() {
            return Err(PlayerError::AlreadySubmitting);
        }
        if mode == SubmitMode::Manual {
            inner.emit(PlayerEvent::ConfirmRequested(
                CONFIRM_SUBMIT_PROMPT.to_string(),
            ));
            return Ok(SubmitOutcome::AwaitingConfirmation);
        }
        if inner
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PlayerError::AlreadySubmitting);
        }
        if mode == SubmitMode::Forced {
            inner.forced_pending.store(false, Ordering::SeqCst);
        }

        inner.emit(PlayerEvent::Submitting);
        let submission = inner.sheet().to_submission(inner.quiz.id);
        info!(
            quiz_id = %inner.quiz.id,
            answers = submission.answers.len(),
            forced = mode == SubmitMode::Forced,
            "submitting quiz"
        );

        match inner.api.submit(&submission).await {
            Ok(result) => {
                inner.active.store(false, Ordering::SeqCst);
                inner.timer.stop();
                inner.poller.stop();
                inner.forced_pending.store(false, Ordering::SeqCst);
                if inner.locked.swap(false, Ordering::SeqCst) {
                    inner.emit(PlayerEvent::LockHidden);
                }
                inner.submitting.store(false, Ordering::SeqCst);
                info!(quiz_id = %inner.quiz.id, percentage = result.percentage, "quiz submitted");
                inner.emit(PlayerEvent::Submitted(result.clone()));
                Ok(SubmitOutcome::Submitted(result))
            }
            Err(err) => {
                inner.submitting.store(false, Ordering::SeqCst);
                warn!(quiz_id = %inner.quiz.id, error = %err, "submission failed");
                inner.emit(PlayerEvent::SubmitFailed(format!("Submission Failed: {err}")));
                if mode != SubmitMode::Forced && inner.forced_pending.swap(false, Ordering::SeqCst) {
                    info!(quiz_id = %inner.quiz.id, "time ran out during this request, forcing submission");
                    self.force_submit();
                }
                Err(err.into())
            }
        }
    }

    /// Submit without confirmation because time ran out.
    ///
    /// Runs on its own task, since a successful submission stops the timer
    /// that calls this. If another request is still in flight, the forced
    /// submission is kept pending and runs once that request fails.
    pub(super) fn force_submit(&self) {
        self.inner.forced_pending.store(true, Ordering::SeqCst);
        let player = self.clone();
        tokio::spawn(async move {
            match player.submit(SubmitMode::Forced).await {
                Ok(_) => {}
                Err(PlayerError::AlreadySubmitting) => {
                    debug!(quiz_id = %player.quiz_id(), "forced submission waits for the request in flight");
                }
                Err(err) => {
                    debug!(quiz_id = %player.quiz_id(), error = %err, "forced submission not delivered");
                }
            }
        });
    }

    /// The student dismissed the confirmation prompt. Nothing is sent.
    #[must_use]
    pub fn decline_submit(&self) -> SubmitOutcome {
        debug!(quiz_id = %self.inner.quiz.id, "submission cancelled by user");
        SubmitOutcome::Cancelled
    }
}
