use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use tracing::warn;

use crate::context::AppContext;
use crate::views::{GroupView, GroupsView, LoginView, QuizAdminView, QuizView, RegisterView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", GroupsView)] Groups {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[route("/group/:group_id", GroupView)] Group { group_id: u64 },
    #[end_layout]
    // Quiz pages render without the sidebar.
    #[route("/quiz/:quiz_id", QuizView)] Quiz { quiz_id: u64 },
    #[route("/quiz/:quiz_id/admin", QuizAdminView)] QuizAdmin { quiz_id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SignedInUser {
    name: String,
    pfp_url: Option<String>,
}

#[component]
pub(crate) fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let session = use_resource(move || {
        let auth = auth.clone();
        async move {
            let session = auth.current_session().await.ok().flatten()?;
            let user = match auth.profile().await {
                Ok(profile) => SignedInUser {
                    name: profile.display_name().to_string(),
                    pfp_url: Some(profile.pfp_url).filter(|url| !url.trim().is_empty()),
                },
                Err(err) => {
                    warn!(error = %err, "failed to load profile");
                    SignedInUser {
                        name: session.username,
                        pfp_url: None,
                    }
                }
            };
            Some(user)
        }
    });
    let user = session.value().read().clone().flatten();

    let logout = {
        let auth = ctx.auth();
        move |_| {
            let auth = auth.clone();
            let mut session = session;
            spawn(async move {
                if let Err(err) = auth.logout().await {
                    warn!(error = %err, "logout failed");
                }
                session.restart();
                navigator.push(Route::Login {});
            });
        }
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "cQuizy" }
            p { class: "server", "{ctx.server_label()}" }
            ul {
                li { Link { to: Route::Groups {}, "Groups" } }
                if let Some(user) = user {
                    li { class: "user",
                        if let Some(src) = user.pfp_url {
                            img { class: "pfp", src, alt: "Profile Picture" }
                        }
                        span { "Signed in as {user.name}" }
                    }
                    li {
                        button { class: "link", onclick: logout, "Log out" }
                    }
                } else {
                    li { Link { to: Route::Login {}, "Log in" } }
                    li { Link { to: Route::Register {}, "Register" } }
                }
            }
        }
    }
}
