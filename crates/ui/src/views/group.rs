use dioxus::prelude::*;
use dioxus_router::Link;

use cquizy_core::model::GroupId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{MemberRowVm, QuizRowVm, map_member_rows, map_quiz_rows};

#[derive(Clone, Debug, PartialEq)]
struct GroupPageData {
    name: String,
    rows: Vec<QuizRowVm>,
    members: Vec<MemberRowVm>,
}

#[component]
pub fn GroupView(group_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let group_id = GroupId::new(group_id);
    let groups = ctx.groups();
    let resource = use_resource(move || {
        let groups = groups.clone();
        async move {
            // The rank decides whether admin links are shown.
            let group = groups
                .list_groups()
                .await
                .map_err(ViewError::from)?
                .into_iter()
                .find(|group| group.id == group_id);
            let quizzes = groups.list_quizzes(group_id).await.map_err(ViewError::from)?;
            let members = groups.list_members(group_id).await.map_err(ViewError::from)?;
            let name = group
                .as_ref()
                .map(|group| group.name.clone())
                .or_else(|| quizzes.first().map(|quiz| quiz.summary.group_name.clone()))
                .unwrap_or_else(|| format!("Group {group_id}"));
            Ok::<_, ViewError>(GroupPageData {
                name,
                rows: map_quiz_rows(&quizzes, group.map(|group| group.rank)),
                members: map_member_rows(&members),
            })
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            Link { class: "back-btn", to: Route::Groups {}, "← Back to groups" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    h2 { "{data.name}" }
                    if data.rows.is_empty() {
                        p { class: "empty", "No quizzes scheduled for this group." }
                    }
                    table { class: "quiz-table",
                        thead {
                            tr {
                                th { "Quiz" }
                                th { "Window" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for row in data.rows {
                                QuizRow { key: "{row.id}", row }
                            }
                        }
                    }
                    section { class: "members",
                        h3 { "Members" }
                        if data.members.is_empty() {
                            p { class: "empty", "No members found." }
                        }
                        ul { class: "member-list",
                            for member in data.members {
                                li { key: "{member.id}",
                                    strong { "{member.name}" }
                                    " "
                                    span { class: "rank", "({member.rank_label})" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizRow(row: QuizRowVm) -> Element {
    let quiz_id = row.id.value();
    rsx! {
        tr {
            td { "{row.name}" }
            td { "{row.window}" }
            td { span { class: "status", "{row.status_label}" } }
            td { class: "actions",
                if row.can_start {
                    Link { class: "primary", to: Route::Quiz { quiz_id }, "Start" }
                }
                if row.can_manage {
                    Link { to: Route::QuizAdmin { quiz_id }, "Monitor" }
                }
            }
        }
    }
}
