use leptos::*;
use leptos_router::use_navigate;

use crate::client;
use crate::models::session::{email_allowed, DEFAULT_EMAIL_DOMAIN};

/// Unauthenticated landing screen: institutional-email sign-in. A session
/// that somehow carries a non-institutional address is alerted and signed
/// out on load.
#[component]
pub fn LandingPage() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let navigate = use_navigate();

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(Some(user)) = client::current_session().await {
                if !email_allowed(&user.email, DEFAULT_EMAIL_DOMAIN) {
                    let _ = window().alert_with_message(&format!(
                        "Only {} emails are allowed.",
                        DEFAULT_EMAIL_DOMAIN
                    ));
                    let _ = client::sign_out().await;
                }
            }
        });
    });

    let handle_login = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        set_loading.set(true);
        spawn_local(async move {
            match client::sign_in(&email.get_untracked()).await {
                Ok(_) => navigate("/home", Default::default()),
                Err(e) => {
                    let _ = window().alert_with_message(&e.to_string());
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="landing">
            <div class="landing-card">
                <h1 class="landing-title">{ "BITS Course Reviews" }</h1>
                <h2>{ "Get Started" }</h2>
                <p class="muted">{ "Sign in with your BITS email to continue" }</p>
                <form on:submit=handle_login>
                    <input
                        type="email"
                        placeholder={format!("you@{}", DEFAULT_EMAIL_DOMAIN)}
                        prop:value=email
                        on:input=move |e| set_email.set(event_target_value(&e))
                    />
                    <button type="submit" class="primary" prop:disabled=loading>
                        {move || if loading.get() { "Signing in…" } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
