//! Countdown math for the quiz timer badge.

use chrono::Duration;

/// Remaining time at or below which the countdown is shown as urgent.
pub const URGENT_THRESHOLD_SECS: i64 = 5 * 60;

/// Label rendered once the deadline has passed.
pub const TIME_UP_LABEL: &str = "TIME UP";

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Whole days/hours/minutes/seconds of a positive remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownParts {
    /// Split a remaining duration into display parts.
    ///
    /// Returns `None` when nothing remains. Sub-second remainders are dropped.
    #[must_use]
    pub fn from_remaining(remaining: Duration) -> Option<Self> {
        if remaining <= Duration::zero() {
            return None;
        }
        let total = remaining.num_seconds();
        Some(Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        })
    }

    /// `HH:MM:SS`, prefixed with `Nd ` when at least a day remains.
    #[must_use]
    pub fn label(&self) -> String {
        let clock = format!(
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        );
        if self.days > 0 {
            format!("{}d {clock}", self.days)
        } else {
            clock
        }
    }
}

/// What the timer badge shows for a given remaining duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownDisplay {
    Running { label: String, urgent: bool },
    TimeUp,
}

impl CountdownDisplay {
    #[must_use]
    pub fn from_remaining(remaining: Duration) -> Self {
        match CountdownParts::from_remaining(remaining) {
            Some(parts) => Self::Running {
                label: parts.label(),
                urgent: remaining <= Duration::seconds(URGENT_THRESHOLD_SECS),
            },
            None => Self::TimeUp,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Running { label, .. } => label,
            Self::TimeUp => TIME_UP_LABEL,
        }
    }

    #[must_use]
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::Running { urgent: true, .. })
    }

    #[must_use]
    pub fn is_time_up(&self) -> bool {
        matches!(self, Self::TimeUp)
    }
}
