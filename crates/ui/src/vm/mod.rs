mod admin_vm;
mod group_vm;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use admin_vm::{EventRowVm, SubmissionRowVm, map_event_rows, map_submission_rows};
pub use group_vm::{
    GroupCardVm, MemberRowVm, QuizRowVm, map_group_cards, map_member_rows, map_quiz_rows,
};
pub use quiz_vm::{AnswerChange, BlockVm, OptionVm, map_blocks};
pub use result_vm::{NO_GRADE_NOTICE, ResultVm};
pub use time_fmt::{format_datetime, format_datetime_in};
