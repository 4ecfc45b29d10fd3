use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};

/// On-load session check shared by every authenticated page: no active
/// session means an immediate replace-navigation to the landing screen,
/// before any data renders. This is a precondition check, not a security
/// boundary; ownership is enforced by the backend queries.
pub fn use_session_guard() {
    let navigate = use_navigate();
    create_effect(move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            if let Ok(None) = crate::client::current_session().await {
                navigate(
                    "/",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        });
    });
}
