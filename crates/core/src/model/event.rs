use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::EventId;
use crate::model::lock::EventKind;

pub const UNLOCK_NOTE: &str = "Unlocked by Admin";

/// Lifecycle of a cheat/system event as seen by the teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    #[serde(rename = "STATIC", alias = "static")]
    Static,
    /// The student is locked until a teacher resolves the event.
    #[serde(rename = "ACTIVE", alias = "active")]
    Active,
    #[serde(rename = "HANDLED", alias = "handled")]
    Handled,
}

/// An event row from the quiz admin event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatEvent {
    pub id: EventId,
    pub student_name: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub status: EventStatus,
    pub created_at: String,
}

impl CheatEvent {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }

    /// Parses `created_at`, which the server renders either as RFC 3339 or as
    /// `YYYY-MM-DD HH:MM:SS[.ffffff][+00:00]`.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self.kind {
            EventKind::TabSwitch => "Student left the tab.",
            EventKind::Other(_) => "System Event",
        }
    }
}

/// Active events first, then newest first. Unparseable timestamps sort last.
pub fn sort_events(events: &mut [CheatEvent]) {
    events.sort_by(|a, b| match (a.is_active(), b.is_active()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b.created_at_utc().cmp(&a.created_at_utc()),
    });
}

/// Body of `POST /api/quizzes/events/{event_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveEvent {
    pub action: &'static str,
    pub note: Option<String>,
}

impl ResolveEvent {
    #[must_use]
    pub fn unlock() -> Self {
        Self {
            action: "unlock",
            note: Some(UNLOCK_NOTE.to_string()),
        }
    }
}
