use leptos::*;
use leptos_router::A;
use wasm_bindgen::JsCast;

use crate::browse::{departments, derive_course_list, BrowseState, SortKey};
use crate::client;
use crate::components::nav_bar::{LogoutButton, NavBar};
use crate::models::course::CourseListing;
use crate::utils::session_guard::use_session_guard;

/// Browse screen: search, sort and department filter over the full course
/// list. The list itself never refetches while filtering; everything after
/// the initial load is the pure derivation pipeline in `browse`.
#[component]
pub fn BrowsePage() -> impl IntoView {
    use_session_guard();

    let (courses, set_courses) = create_signal(Vec::<CourseListing>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let (state, set_state) = create_signal(BrowseState::default());

    create_effect(move |_| {
        spawn_local(async move {
            match client::fetch_course_listings().await {
                Ok(list) => set_courses.set(list),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let sort_ref = create_node_ref::<html::Div>();
    let filter_ref = create_node_ref::<html::Div>();

    // Any interaction outside the two dropdown regions closes both.
    let outside_click = window_event_listener(ev::mousedown, move |ev| {
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let inside = |node_ref: NodeRef<html::Div>| {
            node_ref
                .get_untracked()
                .map(|el| el.contains(target.as_ref()))
                .unwrap_or(false)
        };
        if !inside(sort_ref) && !inside(filter_ref) {
            set_state.update(|s| {
                s.sort_open = false;
                s.filter_open = false;
            });
        }
    });
    on_cleanup(move || outside_click.remove());

    let filtered = move || derive_course_list(&courses.get(), &state.get());

    view! {
        <div class="page">
            <NavBar>
                <A href="/submit-review?from=home" class="nav-link">{ "Submit a review" }</A>
                <A href="/bookmarks?from=home" class="nav-link">{ "Bookmarks" }</A>
                <A href="/profile" class="nav-link">{ "Profile" }</A>
                <LogoutButton/>
            </NavBar>

            <main class="browse-main">
                <h1 class="browse-title">{ "Browse" }</h1>

                <div class="controls">
                    <input
                        class="search-input"
                        placeholder="Search by course code, name, prof or abbr. ..."
                        prop:value=move || state.get().search
                        on:input=move |e| {
                            let term = event_target_value(&e);
                            set_state.update(|s| s.search = term);
                        }
                    />

                    <div class="dropdown" node_ref=sort_ref>
                        <button
                            class="pill"
                            on:click=move |_| set_state.update(|s| {
                                s.sort_open = !s.sort_open;
                                s.filter_open = false;
                            })
                        >
                            { "Sort" }
                        </button>
                        <Show when=move || state.get().sort_open>
                            <div class="dropdown-menu">
                                <button on:click=move |_| set_state.update(|s| s.toggle_sort(SortKey::CourseName))>
                                    {move || format!("Course name{}", state.get().sort_arrow(SortKey::CourseName))}
                                </button>
                                <button on:click=move |_| set_state.update(|s| s.toggle_sort(SortKey::Prof))>
                                    {move || format!("Professor{}", state.get().sort_arrow(SortKey::Prof))}
                                </button>
                            </div>
                        </Show>
                    </div>

                    <div class="dropdown" node_ref=filter_ref>
                        <button
                            class="pill"
                            on:click=move |_| set_state.update(|s| {
                                s.filter_open = !s.filter_open;
                                s.sort_open = false;
                            })
                        >
                            { "Filter" }
                        </button>
                        <Show when=move || state.get().filter_open>
                            <div class="dropdown-menu">
                                <button on:click=move |_| set_state.update(|s| s.selected_dept = None)>
                                    { "All" }
                                </button>
                                {move || departments(&courses.get()).into_iter().map(|dept| {
                                    let selected = dept.clone();
                                    view! {
                                        <button on:click=move |_| {
                                            let dept = selected.clone();
                                            set_state.update(|s| s.selected_dept = Some(dept));
                                        }>
                                            {dept}
                                        </button>
                                    }
                                }).collect::<Vec<_>>()}
                            </div>
                        </Show>
                    </div>
                </div>

                <Show when=move || loading.get()>
                    <p class="muted">{ "Loading courses…" }</p>
                </Show>
                {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}
                <Show when=move || !loading.get() && error.get().is_none() && filtered().is_empty()>
                    <p class="muted">{ "No courses found." }</p>
                </Show>

                <section class="card-grid">
                    {move || filtered().into_iter().map(|course| {
                        let href = format!("/course/{}", urlencoding::encode(&course.course_code));
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
                                    <p class="card-count">{format!("{} reviews", course.review_count)}</p>
                                </article>
                            </A>
                        }
                    }).collect::<Vec<_>>()}
                </section>
            </main>
        </div>
    }
}
