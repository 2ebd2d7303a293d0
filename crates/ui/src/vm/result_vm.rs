use cquizy_core::model::{GroupId, QuizResult};

use super::time_fmt::format_datetime;

pub const NO_GRADE_NOTICE: &str = "(No grade assigned for this percentage)";

/// Read-only result card shown after submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub percentage: String,
    pub grade: Option<String>,
    pub submitted_at: String,
    pub group_id: Option<GroupId>,
}

impl ResultVm {
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            percentage: result.percentage_label(),
            grade: result.grade().map(str::to_string),
            submitted_at: format_datetime(result.date_submitted),
            group_id: result.group_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cquizy_core::time::fixed_now;

    #[test]
    fn blank_grade_is_treated_as_missing() {
        let vm = ResultVm::from_result(&QuizResult {
            id: None,
            percentage: 66.666,
            grade_value: Some(" ".into()),
            date_submitted: fixed_now(),
            group_id: Some(GroupId::new(4)),
        });
        assert_eq!(vm.percentage, "66.7%");
        assert_eq!(vm.grade, None);
        assert_eq!(vm.group_id, Some(GroupId::new(4)));
    }
}
