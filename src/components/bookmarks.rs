use leptos::*;
use leptos_router::{use_query_map, A};

use crate::client;
use crate::components::nav_bar::{back_destination, BackLink, LogoutButton, NavBar};
use crate::models::course::Course;
use crate::utils::session_guard::use_session_guard;

/// Bookmarked courses for the session user, with per-card removal. Removal
/// completes remotely before the local list is touched.
#[component]
pub fn BookmarksPage() -> impl IntoView {
    use_session_guard();

    let query = use_query_map();
    let from = move || query.with(|q| q.get("from").cloned()).unwrap_or_default();
    let from_course_code = move || query.with(|q| q.get("course_code").cloned());

    let (courses, set_courses) = create_signal(Vec::<Course>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        spawn_local(async move {
            match client::fetch_bookmarks().await {
                Ok(list) => set_courses.set(list),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let handle_remove = move |course_code: String| {
        spawn_local(async move {
            match client::remove_bookmark(&course_code).await {
                Ok(()) => set_courses.update(|list| list.retain(|c| c.course_code != course_code)),
                Err(e) => {
                    let _ = window().alert_with_message(&e.to_string());
                }
            }
        });
    };

    view! {
        <div class="page">
            <NavBar>
                {move || {
                    let (href, label) = back_destination(&from(), from_course_code().as_deref());
                    view! { <BackLink href=href label=label/> }
                }}
                <LogoutButton/>
            </NavBar>

            <main class="list-main">
                <h1 class="list-title">{ "Bookmarked Courses" }</h1>

                <Show when=move || loading.get()>
                    <p class="centered muted">{ "Loading…" }</p>
                </Show>
                {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}
                <Show when=move || !loading.get() && error.get().is_none() && courses.get().is_empty()>
                    <p class="centered muted">{ "You haven’t bookmarked any courses yet." }</p>
                </Show>

                <section class="card-grid">
                    {move || courses.get().into_iter().map(|course| {
                        let href = format!("/course/{}", urlencoding::encode(&course.course_code));
                        let remove_code = course.course_code.clone();
                        view! {
                            <A href=href class="card-link">
                                <article class="card">
                                    <div>
                                        <p class="card-code">{course.course_code.clone()}</p>
                                        <p class="card-name">{course.course_name.clone()}</p>
                                        {course.prof.clone().map(|p| view! {
                                            <p class="card-prof">{format!("by {}", p)}</p>
                                        })}
                                    </div>
                                    <div class="card-actions">
                                        <button
                                            class="danger"
                                            on:click=move |ev| {
                                                // The card itself is a link; keep the
                                                // removal click from navigating.
                                                ev.prevent_default();
                                                ev.stop_propagation();
                                                handle_remove(remove_code.clone());
                                            }
                                        >
                                            { "Remove bookmark" }
                                        </button>
                                    </div>
                                </article>
                            </A>
                        }
                    }).collect::<Vec<_>>()}
                </section>
            </main>
        </div>
    }
}
