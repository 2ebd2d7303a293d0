use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{GroupId, SubmissionId};

/// Graded outcome returned by `POST /api/quizzes/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(default)]
    pub id: Option<SubmissionId>,
    pub percentage: f64,
    #[serde(default)]
    pub grade_value: Option<String>,
    pub date_submitted: DateTime<Utc>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl QuizResult {
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    #[must_use]
    pub fn grade(&self) -> Option<&str> {
        self.grade_value
            .as_deref()
            .filter(|grade| !grade.trim().is_empty())
    }
}

/// A submission row as listed to the teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub student_name: String,
    pub quiz_project: String,
    pub percentage: f64,
    #[serde(default)]
    pub grade_value: Option<String>,
    pub date_submitted: DateTime<Utc>,
}
