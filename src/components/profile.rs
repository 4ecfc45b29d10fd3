use leptos::*;
use leptos_router::A;

use crate::client;
use crate::components::nav_bar::{LogoutButton, NavBar};
use crate::components::review_fields::ReviewFieldsForm;
use crate::models::review::{Review, ReviewFields};
use crate::utils::session_guard::use_session_guard;

/// "My Reviews": the session user's own reviews with edit and delete. The
/// listing query is scoped server-side, so everything on this screen is
/// owned by the viewer.
#[component]
pub fn ProfilePage() -> impl IntoView {
    use_session_guard();

    let (my_reviews, set_my_reviews) = create_signal(Vec::<Review>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let (editing, set_editing) = create_signal(None::<Review>);
    let draft = create_rw_signal(ReviewFields::default());

    let load_reviews = move || {
        spawn_local(async move {
            match client::fetch_my_reviews().await {
                Ok(list) => set_my_reviews.set(list),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };
    create_effect(move |_| load_reviews());

    let handle_delete = move |review_id: String| {
        let confirmed = window()
            .confirm_with_message("Delete this review permanently?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            // Remote first; the local list drops the entry only on success.
            match client::delete_review(&review_id).await {
                Ok(()) => set_my_reviews.update(|list| list.retain(|r| r.review_id != review_id)),
                Err(e) => {
                    let _ = window().alert_with_message(&e.to_string());
                }
            }
        });
    };

    let open_edit = move |review: Review| {
        draft.set(review.fields.clone());
        set_editing.set(Some(review));
    };

    let handle_save = move |_| {
        let Some(review) = editing.get_untracked() else {
            return;
        };
        let fields = draft.get_untracked();
        spawn_local(async move {
            match client::update_review(&review.review_id, &fields).await {
                Ok(()) => {
                    set_editing.set(None);
                    load_reviews();
                }
                Err(e) => {
                    let _ = window().alert_with_message(&e.to_string());
                }
            }
        });
    };

    view! {
        <div class="page">
            <NavBar>
                <A href="/home" class="nav-link">{ "Browse" }</A>
                <A href="/submit-review?from=profile" class="nav-link">{ "Submit a review" }</A>
                <A href="/bookmarks?from=profile" class="nav-link">{ "Bookmarks" }</A>
                <LogoutButton/>
            </NavBar>

            <main class="list-main">
                <h1 class="list-title">{ "My Reviews" }</h1>

                <Show when=move || loading.get()>
                    <p class="centered muted">{ "Loading…" }</p>
                </Show>
                {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}

                <section class="card-grid">
                    {move || my_reviews.get().into_iter().map(|review| {
                        let edit_target = review.clone();
                        let delete_id = review.review_id.clone();
                        view! {
                            <article class="card">
                                <div>
                                    <p class="card-code">{review.course_code.clone()}</p>
                                    <p class="card-name">{review.course_name.clone().unwrap_or_default()}</p>
                                </div>
                                <div class="card-footer">
                                    <span class="card-grade">
                                        {review.fields.your_grade.clone().unwrap_or_else(|| "-".to_string())}
                                    </span>
                                    <div class="card-actions">
                                        <button on:click=move |_| open_edit(edit_target.clone())>
                                            { "Edit" }
                                        </button>
                                        <button class="danger" on:click=move |_| handle_delete(delete_id.clone())>
                                            { "Delete" }
                                        </button>
                                    </div>
                                </div>
                            </article>
                        }
                    }).collect::<Vec<_>>()}
                </section>
            </main>

            {move || editing.get().map(|_| view! {
                <div class="modal-overlay">
                    <div class="modal-backdrop" on:click=move |_| set_editing.set(None)></div>
                    <div class="modal">
                        <h2 class="modal-title">{ "Edit Review" }</h2>
                        <ReviewFieldsForm draft=draft/>
                        <div class="modal-actions">
                            <button on:click=move |_| set_editing.set(None)>{ "Cancel" }</button>
                            <button class="primary" on:click=handle_save>{ "Save" }</button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}
