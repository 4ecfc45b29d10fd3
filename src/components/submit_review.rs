use leptos::*;
use leptos_router::{use_navigate, use_query_map};
use wasm_bindgen::JsCast;

use crate::client;
use crate::components::nav_bar::{back_destination, BackLink, NavBar};
use crate::components::review_fields::ReviewFieldsForm;
use crate::models::course::Course;
use crate::models::review::{NewReview, ReviewFields};
use crate::suggest::{course_suggestions, ActiveField};
use crate::utils::session_guard::use_session_guard;

const SUGGESTION_LIMIT: usize = 8;

/// Review submission: course-code/name inputs with autocomplete over the
/// full course list, the shared field form, and origin-aware navigation
/// after a successful insert.
#[component]
pub fn SubmitReviewPage() -> impl IntoView {
    use_session_guard();

    let query = use_query_map();
    let from = move || query.with(|q| q.get("from").cloned()).unwrap_or_default();
    let from_course_code = move || query.with(|q| q.get("course_code").cloned());

    let (courses, set_courses) = create_signal(Vec::<Course>::new());
    let (course_code, set_course_code) = create_signal(String::new());
    let (course_name, set_course_name) = create_signal(String::new());
    let (active_field, set_active_field) = create_signal(None::<ActiveField>);
    let (show_suggestions, set_show_suggestions) = create_signal(false);
    let draft = create_rw_signal(ReviewFields::default());

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(list) = client::fetch_courses().await {
                set_courses.set(list);
            }
        });
    });

    // Arriving from a course page pre-fills that course.
    create_effect(move |_| {
        if let Some(code) = from_course_code() {
            let decoded = urlencoding::decode(&code)
                .map(|c| c.into_owned())
                .unwrap_or(code);
            set_course_code.set(decoded);
        }
    });

    let wrapper_ref = create_node_ref::<html::Div>();

    // Clicking outside the inputs and the list closes the suggestions and
    // clears the active-field marker.
    let outside_click = window_event_listener(ev::mousedown, move |ev| {
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let inside = wrapper_ref
            .get_untracked()
            .map(|el| el.contains(target.as_ref()))
            .unwrap_or(false);
        if !inside {
            set_show_suggestions.set(false);
            set_active_field.set(None);
        }
    });
    on_cleanup(move || outside_click.remove());

    let suggestions = move || {
        active_field
            .get()
            .map(|field| {
                course_suggestions(&courses.get(), field, &course_code.get(), &course_name.get())
            })
            .unwrap_or_default()
    };

    let navigate = use_navigate();
    let handle_submit = move |_| {
        let review = NewReview {
            course_code: course_code.get_untracked(),
            course_name: course_name.get_untracked(),
            fields: draft.get_untracked(),
        };
        let navigate = navigate.clone();
        let destination = back_destination(&from(), from_course_code().as_deref()).0;
        spawn_local(async move {
            match client::submit_review(&review).await {
                Ok(()) => navigate(&destination, Default::default()),
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
            </NavBar>

            <main class="form-main">
                <div class="form-panel">
                    <h1 class="form-title">{ "Submit a Review" }</h1>

                    <div class="course-inputs" node_ref=wrapper_ref>
                        <div class="course-inputs-row">
                            <input
                                class="course-code-input"
                                placeholder="Course code"
                                prop:value=course_code
                                on:focus=move |_| set_active_field.set(Some(ActiveField::Code))
                                on:input=move |e| {
                                    set_course_code.set(event_target_value(&e));
                                    set_active_field.set(Some(ActiveField::Code));
                                    set_show_suggestions.set(true);
                                }
                            />
                            <input
                                class="course-name-input"
                                placeholder="Course name/abbr."
                                prop:value=course_name
                                on:focus=move |_| set_active_field.set(Some(ActiveField::Name))
                                on:input=move |e| {
                                    set_course_name.set(event_target_value(&e));
                                    set_active_field.set(Some(ActiveField::Name));
                                    set_show_suggestions.set(true);
                                }
                            />
                        </div>

                        <Show when=move || show_suggestions.get() && !suggestions().is_empty()>
                            <div class="suggestion-list">
                                {move || suggestions().into_iter().take(SUGGESTION_LIMIT).map(|course| {
                                    let code = course.course_code.clone();
                                    let name = course.course_name.clone();
                                    view! {
                                        <button
                                            class="suggestion"
                                            on:click=move |_| {
                                                set_course_code.set(code.clone());
                                                set_course_name.set(name.clone());
                                                set_show_suggestions.set(false);
                                                set_active_field.set(None);
                                            }
                                        >
                                            <b>{course.course_code.clone()}</b>
                                            {format!(" — {}", course.course_name)}
                                            {course.nickname.clone().map(|n| view! {
                                                <span class="muted">{format!(" ({})", n)}</span>
                                            })}
                                        </button>
                                    }
                                }).collect::<Vec<_>>()}
                            </div>
                        </Show>
                    </div>

                    <ReviewFieldsForm draft=draft/>

                    <button class="primary submit-button" on:click=handle_submit>
                        { "Submit Review" }
                    </button>
                </div>
            </main>
        </div>
    }
}
