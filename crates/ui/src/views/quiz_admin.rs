use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use cquizy_core::model::{EventId, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{EventRowVm, map_event_rows, map_submission_rows};

#[component]
pub fn QuizAdminView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_id = QuizId::new(quiz_id);

    let mut events = use_signal(Vec::<EventRowVm>::new);
    let mut active_count = use_signal(|| 0_usize);
    let mut loaded = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let admin = ctx.quiz_admin();
    use_future(move || {
        let admin = admin.clone();
        async move {
            let mut monitor = admin.monitor(quiz_id);
            while let Some(snapshot) = monitor.next().await {
                events.set(map_event_rows(&snapshot.events));
                active_count.set(snapshot.active_count);
                loaded.set(true);
            }
        }
    });

    let admin = ctx.quiz_admin();
    let mut submissions = use_resource(move || {
        let admin = admin.clone();
        async move {
            let records = admin
                .list_submissions(quiz_id)
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_submission_rows(&records))
        }
    });
    let submissions_state = view_state_from_resource(submissions);

    let admin = ctx.quiz_admin();
    let unlock = use_callback(move |event_id: EventId| {
        let admin = admin.clone();
        spawn(async move {
            match admin.unlock(event_id).await {
                Ok(()) => {
                    error.set(None);
                    // Drop the button right away; the next refresh confirms.
                    for row in events.write().iter_mut().filter(|row| row.id == event_id) {
                        row.can_unlock = false;
                    }
                    submissions.restart();
                }
                Err(err) => {
                    warn!(%event_id, error = %err, "unlock failed");
                    error.set(Some(ViewError::from(err).message().to_string()));
                }
            }
        });
    });

    rsx! {
        div { class: "page admin-page",
            Link { class: "back-btn", to: Route::Groups {}, "← Back to groups" }
            h2 { "Quiz monitor" }
            if let Some(message) = error() {
                p { class: "error", role: "alert", "{message}" }
            }
            section { class: "events",
                h3 { "Live events" }
                p { class: "active-count", "Locked students: {active_count}" }
                if !loaded() {
                    p { "Loading..." }
                } else if events.read().is_empty() {
                    p { class: "empty", "No events yet." }
                } else {
                    table { class: "event-table",
                        thead {
                            tr {
                                th { "Student" }
                                th { "Event" }
                                th { "Time" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for row in events() {
                                tr { key: "{row.id}", class: if row.can_unlock { "active" } else { "" },
                                    td { "{row.student_name}" }
                                    td { "{row.description}" }
                                    td { "{row.time_label}" }
                                    td { "{row.status_label}" }
                                    td {
                                        if row.can_unlock {
                                            button {
                                                class: "primary",
                                                onclick: move |_| unlock.call(row.id),
                                                "Unlock"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            section { class: "submissions",
                h3 { "Submissions" }
                match submissions_state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error", "{err.message()}" }
                    },
                    ViewState::Ready(rows) => rsx! {
                        if rows.is_empty() {
                            p { class: "empty", "No submissions yet." }
                        }
                        table { class: "submission-table",
                            tbody {
                                for row in rows {
                                    tr {
                                        td { "{row.student_name}" }
                                        td { "{row.percentage}" }
                                        td { "{row.grade}" }
                                        td { "{row.submitted_at}" }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
