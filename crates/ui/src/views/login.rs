use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use services::login_failure_message;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let user = username.peek().clone();
        let pass = password.peek().clone();
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = auth.login(&user, &pass).await;
            busy.set(false);
            match result {
                Ok(_) => {
                    navigator.replace(Route::Groups {});
                }
                Err(err) => error.set(Some(login_failure_message(&err))),
            }
        });
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Log in" }
            if let Some(message) = error() {
                p { class: "error", role: "alert", "{message}" }
            }
            label { "Username"
                input {
                    id: "login-username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
            }
            label { "Password"
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            button {
                id: "login-submit",
                class: "primary",
                disabled: busy(),
                onclick: submit,
                if busy() { "Logging in..." } else { "Log in" }
            }
            p { "No account yet? "
                Link { to: Route::Register {}, "Register" }
            }
        }
    }
}
