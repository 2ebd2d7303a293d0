use serde::{Deserialize, Serialize};

use crate::model::ids::{EventId, QuizId};

pub const DEFAULT_LOCK_MESSAGE: &str = "Waiting for teacher...";

/// Why the quiz window was considered abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockReason {
    /// The page became hidden (tab switch, minimize).
    VisibilityHidden,
    /// The window lost focus.
    FocusLost,
}

impl LockReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::VisibilityHidden => "Tab switched / Minimized",
            Self::FocusLost => "Focus lost (Clicked outside)",
        }
    }
}

/// Kind tag of an event sent to `POST /api/quizzes/events`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TabSwitch,
    #[serde(untagged)]
    Other(String),
}

/// Body of a cheat event report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventReport {
    pub quiz_id: QuizId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub desc: String,
}

impl EventReport {
    #[must_use]
    pub fn tab_switch(quiz_id: QuizId, reason: LockReason) -> Self {
        Self {
            quiz_id,
            kind: EventKind::TabSwitch,
            desc: format!("User left the window: {}", reason.describe()),
        }
    }
}

/// Response of `GET /api/quizzes/{id}/lock-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatus {
    pub is_locked: bool,
    #[serde(default)]
    pub active_event_id: Option<EventId>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LockStatus {
    /// Text shown on the lock overlay while the lock persists.
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(DEFAULT_LOCK_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_switch_report_wire_shape() {
        let report = EventReport::tab_switch(QuizId::new(4), LockReason::FocusLost);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "quiz_id": 4,
                "type": "tab_switch",
                "desc": "User left the window: Focus lost (Clicked outside)"
            })
        );
    }

    #[test]
    fn unknown_event_kinds_round_trip() {
        let kind: EventKind = serde_json::from_str("\"kiosk_exit\"").unwrap();
        assert_eq!(kind, EventKind::Other("kiosk_exit".into()));
        let kind: EventKind = serde_json::from_str("\"tab_switch\"").unwrap();
        assert_eq!(kind, EventKind::TabSwitch);
    }

    #[test]
    fn lock_message_falls_back_when_missing() {
        let status: LockStatus = serde_json::from_str(r#"{"is_locked": true}"#).unwrap();
        assert_eq!(status.display_message(), DEFAULT_LOCK_MESSAGE);

        let status: LockStatus = serde_json::from_str(
            r#"{"is_locked": true, "active_event_id": 3, "message": "Teacher approval required to continue."}"#,
        )
        .unwrap();
        assert_eq!(status.active_event_id, Some(EventId::new(3)));
        assert_eq!(
            status.display_message(),
            "Teacher approval required to continue."
        );
    }
}
