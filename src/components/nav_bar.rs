use leptos::*;
use leptos_router::{use_navigate, NavigateOptions, A};

/// Top bar shared by every page: app title on the left, contextual links on
/// the right. Pages supply their own links as children.
#[component]
pub fn NavBar(children: Children) -> impl IntoView {
    view! {
        <header class="top-bar">
            <span class="top-bar-title">{ "BITS Course Reviews" }</span>
            <nav class="top-bar-nav">
                {children()}
            </nav>
        </header>
    }
}

#[component]
pub fn LogoutButton() -> impl IntoView {
    let navigate = use_navigate();
    let handle_logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            let _ = crate::client::sign_out().await;
            navigate(
                "/",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
    };

    view! {
        <button class="nav-link" on:click=handle_logout>{ "Log out" }</button>
    }
}

/// Where "back" leads from a sub-screen, decided by the `from` query
/// parameter the origin page put in the link.
pub fn back_destination(from: &str, course_code: Option<&str>) -> (String, &'static str) {
    match (from, course_code) {
        ("course", Some(code)) => (
            format!("/course/{}", urlencoding::encode(code)),
            "← Back to Reviews",
        ),
        ("profile", _) => ("/profile".to_string(), "← Back to Profile"),
        _ => ("/home".to_string(), "← Back to Home"),
    }
}

#[component]
pub fn BackLink(href: String, label: &'static str) -> impl IntoView {
    view! {
        <A href=href class="nav-link">{label}</A>
    }
}
