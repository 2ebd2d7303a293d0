use dioxus::prelude::*;
use dioxus_router::Link;

use cquizy_core::countdown::CountdownDisplay;
use cquizy_core::model::BlockKind;

use crate::routes::Route;
use crate::vm::{AnswerChange, BlockVm, NO_GRADE_NOTICE, ResultVm};

#[component]
pub(super) fn CountdownBadge(display: CountdownDisplay) -> Element {
    let class = if display.is_time_up() {
        "timer time-up"
    } else if display.is_urgent() {
        "timer urgent"
    } else {
        "timer"
    };
    rsx! {
        div { id: "quiz-timer", class, "{display.label()}" }
    }
}

#[component]
pub(super) fn QuestionBlock(
    block: BlockVm,
    disabled: bool,
    on_change: EventHandler<AnswerChange>,
) -> Element {
    let name = block.input_name();
    rsx! {
        div { class: "question-block", "data-block-id": "{block.id}",
            div { class: "question-text", "{block.number}. {block.question}" }
            if let Some(subtext) = block.subtext.as_ref() {
                div { class: "subtext", "{subtext}" }
            }
            if let Some(src) = block.image_url.as_ref() {
                img { class: "question-image", src: "{src}" }
            }
            if let Some(href) = block.link_url.as_ref() {
                div { class: "question-link",
                    a { href: "{href}", target: "_blank", rel: "noopener noreferrer",
                        "Attached Resource Link"
                    }
                }
            }
            div { class: "options-container",
                match block.kind {
                    BlockKind::Text => rsx! {
                        textarea {
                            class: "quiz-input",
                            rows: 3,
                            placeholder: "Type your answer here...",
                            disabled,
                            value: "{block.text}",
                            oninput: move |evt| on_change.call(AnswerChange::Text(evt.value())),
                        }
                    },
                    kind => rsx! {
                        for option in block.options.iter().cloned() {
                            ChoiceOption {
                                key: "{option.value}",
                                name: name.clone(),
                                multiple: kind == BlockKind::MultipleChoice,
                                value: option.value.clone(),
                                selected: option.selected,
                                disabled,
                                on_change,
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ChoiceOption(
    name: String,
    multiple: bool,
    value: String,
    selected: bool,
    disabled: bool,
    on_change: EventHandler<AnswerChange>,
) -> Element {
    let input_type = if multiple { "checkbox" } else { "radio" };
    let label = value.clone();
    rsx! {
        label {
            input {
                r#type: input_type,
                class: "quiz-input",
                name: "{name}",
                value: "{label}",
                checked: selected,
                disabled,
                onchange: move |evt: FormEvent| {
                    let change = if multiple {
                        AnswerChange::Toggle { value: value.clone(), checked: evt.checked() }
                    } else {
                        AnswerChange::Select(value.clone())
                    };
                    on_change.call(change);
                },
            }
            "{label}"
        }
    }
}

#[component]
pub(super) fn LockOverlay(message: String) -> Element {
    rsx! {
        div { id: "lock-overlay", class: "overlay lock-overlay",
            div { class: "overlay-card",
                h2 { "⚠ Test Locked" }
                p { "You left the test window. Your teacher has been notified." }
                p { id: "lock-status-text", class: "lock-status", "{message}" }
            }
        }
    }
}

#[component]
pub(super) fn ConfirmModal(
    prompt: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "overlay",
            div { class: "overlay-card", role: "dialog",
                p { "{prompt}" }
                div { class: "modal-actions",
                    button { id: "confirm-cancel", onclick: move |_| on_cancel.call(()), "Cancel" }
                    button {
                        id: "confirm-submit",
                        class: "primary",
                        onclick: move |_| on_confirm.call(()),
                        "Submit"
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn NoticeBanner(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "notice", role: "alert",
            span { "{message}" }
            button { class: "link", onclick: move |_| on_dismiss.call(()), "OK" }
        }
    }
}

#[component]
pub(super) fn ResultCard(result: ResultVm) -> Element {
    rsx! {
        div { class: "result",
            h1 { class: "result-title", "✓ Submitted!" }
            p { "Your answers have been recorded successfully." }
            div { class: "result-card",
                h2 { "Result: {result.percentage}" }
                if let Some(grade) = result.grade.as_ref() {
                    h3 { class: "grade", "Grade: {grade}" }
                } else {
                    p { em { "{NO_GRADE_NOTICE}" } }
                }
                p { class: "muted", "Submitted on: {result.submitted_at}" }
            }
            if let Some(group_id) = result.group_id {
                Link { class: "back-btn", to: Route::Group { group_id: group_id.value() }, "Return to Group" }
            } else {
                Link { class: "back-btn", to: Route::Groups {}, "Return to Groups" }
            }
        }
    }
}
