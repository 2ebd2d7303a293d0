use cquizy_core::model::{CheatEvent, EventId, EventStatus, SubmissionRecord};

use super::result_vm::NO_GRADE_NOTICE;
use super::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRowVm {
    pub id: EventId,
    pub student_name: String,
    pub description: &'static str,
    pub status_label: &'static str,
    pub time_label: String,
    pub can_unlock: bool,
}

/// Rows in the order given; sorting is the service's job.
#[must_use]
pub fn map_event_rows(events: &[CheatEvent]) -> Vec<EventRowVm> {
    events
        .iter()
        .map(|event| EventRowVm {
            id: event.id,
            student_name: event.student_name.clone(),
            description: event.description(),
            status_label: match event.status {
                EventStatus::Active => "LOCKED",
                EventStatus::Handled => "Resolved",
                EventStatus::Static => "Logged",
            },
            time_label: event
                .created_at_utc()
                .map_or_else(|| event.created_at.clone(), format_datetime),
            can_unlock: event.is_active(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionRowVm {
    pub student_name: String,
    pub percentage: String,
    pub grade: String,
    pub submitted_at: String,
}

#[must_use]
pub fn map_submission_rows(records: &[SubmissionRecord]) -> Vec<SubmissionRowVm> {
    records
        .iter()
        .map(|record| SubmissionRowVm {
            student_name: record.student_name.clone(),
            percentage: format!("{:.1}%", record.percentage),
            grade: record
                .grade_value
                .as_deref()
                .filter(|grade| !grade.trim().is_empty())
                .map_or_else(|| NO_GRADE_NOTICE.to_string(), str::to_string),
            submitted_at: format_datetime(record.date_submitted),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cquizy_core::model::EventKind;

    #[test]
    fn only_active_events_can_be_unlocked() {
        let events = [
            CheatEvent {
                id: EventId::new(1),
                student_name: "Ann".into(),
                kind: EventKind::TabSwitch,
                status: EventStatus::Active,
                created_at: "not a date".into(),
            },
            CheatEvent {
                id: EventId::new(2),
                student_name: "Bob".into(),
                kind: EventKind::Other("timeout".into()),
                status: EventStatus::Handled,
                created_at: "2024-01-01T10:00:00Z".into(),
            },
        ];
        let rows = map_event_rows(&events);
        assert!(rows[0].can_unlock);
        assert_eq!(rows[0].time_label, "not a date");
        assert_eq!(rows[0].description, "Student left the tab.");
        assert!(!rows[1].can_unlock);
        assert_eq!(rows[1].status_label, "Resolved");
        assert_eq!(rows[1].description, "System Event");
    }
}
