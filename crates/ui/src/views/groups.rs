use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{GroupCardVm, map_group_cards};

#[component]
pub fn GroupsView() -> Element {
    let ctx = use_context::<AppContext>();
    let groups = ctx.groups();
    let mut resource = use_resource(move || {
        let groups = groups.clone();
        async move {
            let list = groups.list_groups().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_group_cards(&list))
        }
    });
    let state = view_state_from_resource(resource);

    let mut invite_code = use_signal(String::new);
    let mut join_error = use_signal(|| None::<String>);
    let mut joining = use_signal(|| false);

    let join = move |_| {
        if joining() {
            return;
        }
        let groups = ctx.groups();
        let code = invite_code.peek().clone();
        joining.set(true);
        join_error.set(None);
        spawn(async move {
            match groups.join_group(&code).await {
                Ok(_) => {
                    invite_code.set(String::new());
                    resource.restart();
                }
                Err(err) => join_error.set(Some(ViewError::from(err).message().to_string())),
            }
            joining.set(false);
        });
    };

    rsx! {
        div { class: "page",
            h2 { "My Groups" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::Unauthenticated) => rsx! {
                    p { "{ViewError::Unauthenticated.message()}" }
                    Link { to: Route::Login {}, "Log in" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "empty", "You are not a member of any group yet." }
                    }
                    div { class: "group-grid",
                        for card in cards {
                            GroupCard { key: "{card.id}", card }
                        }
                    }
                    div { class: "join-group",
                        h3 { "Join a group" }
                        if let Some(message) = join_error() {
                            p { class: "error", role: "alert", "{message}" }
                        }
                        input {
                            id: "invite-code",
                            placeholder: "Invite code",
                            value: "{invite_code}",
                            oninput: move |evt| invite_code.set(evt.value()),
                        }
                        button {
                            id: "join-group",
                            disabled: joining(),
                            onclick: join,
                            "Join"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn GroupCard(card: GroupCardVm) -> Element {
    rsx! {
        div { class: "group-card",
            h3 {
                Link { to: Route::Group { group_id: card.id.value() }, "{card.name}" }
            }
            p { class: "rank", "{card.rank_label}" }
            for badge in card.badges.iter() {
                span { class: "badge", "{badge}" }
            }
            if let Some(code) = card.invite_code.as_ref() {
                p { class: "invite", "Invite code: {code}" }
            }
        }
    }
}
