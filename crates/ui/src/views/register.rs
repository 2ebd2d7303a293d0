use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use cquizy_core::model::RegisterDraft;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
fn Field(label: &'static str, id: &'static str, kind: &'static str, value: Signal<String>) -> Element {
    let mut value = value;
    rsx! {
        label { "{label}"
            input {
                id,
                r#type: kind,
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let username = use_signal(String::new);
    let nickname = use_signal(String::new);
    let first_name = use_signal(String::new);
    let last_name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let pfp_url = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        if busy() {
            return;
        }
        let draft = RegisterDraft {
            username: username.peek().clone(),
            nickname: nickname.peek().clone(),
            first_name: first_name.peek().clone(),
            last_name: last_name.peek().clone(),
            email: email.peek().clone(),
            password: password.peek().clone(),
            pfp_url: pfp_url.peek().clone(),
        };
        let auth = ctx.auth();
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = auth.register(draft).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    navigator.push(Route::Login {});
                }
                Err(err) => error.set(Some(ViewError::from(err).message().to_string())),
            }
        });
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Create an account" }
            if let Some(message) = error() {
                p { class: "error", role: "alert", "{message}" }
            }
            Field { label: "Username", id: "register-username", kind: "text", value: username }
            Field { label: "Nickname (optional)", id: "register-nickname", kind: "text", value: nickname }
            Field { label: "First name", id: "register-first-name", kind: "text", value: first_name }
            Field { label: "Last name", id: "register-last-name", kind: "text", value: last_name }
            Field { label: "Email", id: "register-email", kind: "email", value: email }
            Field { label: "Password", id: "register-password", kind: "password", value: password }
            Field { label: "Profile picture URL (optional)", id: "register-pfp", kind: "url", value: pfp_url }
            button {
                id: "register-submit",
                class: "primary",
                disabled: busy(),
                onclick: submit,
                "Register"
            }
            p { "Already registered? "
                Link { to: Route::Login {}, "Log in" }
            }
        }
    }
}
