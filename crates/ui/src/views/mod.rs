mod group;
mod groups;
mod login;
mod quiz;
mod quiz_admin;
mod register;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use group::GroupView;
pub use groups::GroupsView;
pub use login::LoginView;
pub use quiz::QuizView;
pub use quiz_admin::QuizAdminView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
