use leptos::*;
use leptos_router::{use_params_map, A};

use crate::client;
use crate::client::ClientError;
use crate::components::nav_bar::{LogoutButton, NavBar};
use crate::models::course::Course;
use crate::models::review::ReviewFields;
use crate::utils::session_guard::use_session_guard;

/// Course detail: header, aggregate stats, handout link, bookmark action,
/// review cards and the detailed-review modal.
#[component]
pub fn CoursePage() -> impl IntoView {
    use_session_guard();

    let params = use_params_map();
    let course_code = move || {
        let raw = params.with(|p| p.get("course_code").cloned()).unwrap_or_default();
        urlencoding::decode(&raw)
            .map(|code| code.into_owned())
            .unwrap_or(raw)
    };

    let (course, set_course) = create_signal(None::<Course>);
    let (reviews, set_reviews) = create_signal(Vec::<ReviewFields>::new());
    let (loading, set_loading) = create_signal(true);
    let (selected, set_selected) = create_signal(None::<(usize, ReviewFields)>);

    create_effect(move |_| {
        let code = course_code();
        set_loading.set(true);
        spawn_local(async move {
            match client::fetch_course(&code).await {
                Ok(Some(found)) => {
                    set_course.set(Some(found));
                    if let Ok(list) = client::fetch_course_reviews(&code).await {
                        set_reviews.set(list);
                    }
                }
                Ok(None) | Err(_) => set_course.set(None),
            }
            set_loading.set(false);
        });
    });

    let handle_bookmark = move |_| {
        let Some(code) = course.get_untracked().map(|c| c.course_code) else {
            return;
        };
        spawn_local(async move {
            let message = match client::add_bookmark(&code).await {
                Ok(()) => "Course bookmarked!".to_string(),
                Err(ClientError::AlreadyBookmarked) => "Already bookmarked".to_string(),
                Err(e) => e.to_string(),
            };
            let _ = window().alert_with_message(&message);
        });
    };

    view! {
        <div class="page">
            <NavBar>
                <A href="/home" class="nav-link">{ "← Back to home" }</A>
                {move || course.get().map(|c| {
                    let href = format!(
                        "/submit-review?from=course&course_code={}",
                        urlencoding::encode(&c.course_code)
                    );
                    view! { <A href=href class="nav-link">{ "Submit a review" }</A> }
                })}
                <A href="/bookmarks?from=home" class="nav-link">{ "Bookmarks" }</A>
                <A href="/profile" class="nav-link">{ "Profile" }</A>
                <LogoutButton/>
            </NavBar>

            <Show when=move || loading.get()>
                <p class="centered muted">{ "Loading…" }</p>
            </Show>

            <Show when=move || !loading.get() && course.get().is_none()>
                <p class="centered muted">{ "Course not found" }</p>
            </Show>

            {move || course.get().map(|c| {
                let review_count = move || reviews.get().len();
                view! {
                    <main class="course-main">
                        <section class="course-header">
                            <div>
                                <h1 class="course-code">{c.course_code.clone()}</h1>
                                <h2 class="course-name">{c.course_name.clone()}</h2>
                                {c.prof.clone().map(|p| view! {
                                    <p class="course-prof">{format!("by {}", p)}</p>
                                })}
                                <p class="muted">{move || format!("{} reviews", review_count())}</p>
                            </div>
                            <div>
                                <h3>{ "COURSE INFORMATION" }</h3>
                                <p class="course-info">{c.info.clone().unwrap_or_default()}</p>
                                <button class="primary" on:click=handle_bookmark>
                                    { "Bookmark this course" }
                                </button>
                            </div>
                        </section>

                        <section class="stats">
                            {[
                                ("Average Marks", c.av_marks.clone()),
                                ("Course Total", c.course_total.clone()),
                                ("Average Grade", c.av_grade.clone()),
                            ].into_iter().map(|(label, value)| view! {
                                <div class="stat">
                                    <div class="stat-label">
                                        {label.split(' ').map(|word| view! {
                                            <p>{word.to_string()}</p>
                                        }).collect::<Vec<_>>()}
                                    </div>
                                    <p class="stat-value">{value.unwrap_or_else(|| "-".to_string())}</p>
                                </div>
                            }).collect::<Vec<_>>()}

                            <div class="stat">
                                <div class="stat-label">
                                    <p>{ "Course" }</p>
                                    <p>{ "Handout" }</p>
                                </div>
                                {match c.course_handout.clone() {
                                    Some(url) => view! {
                                        <a class="handout-link" href=url target="_blank">{ "PDF" }</a>
                                    }.into_view(),
                                    None => view! { <p class="stat-value">{ "-" }</p> }.into_view(),
                                }}
                            </div>
                        </section>

                        <section class="reviews">
                            <Show when=move || reviews.get().is_empty()>
                                <p class="muted">{ "No reviews yet." }</p>
                            </Show>
                            <div class="review-grid">
                                {move || reviews.get().into_iter().enumerate().map(|(idx, fields)| {
                                    let detail = fields.clone();
                                    view! {
                                        <div class="review-card">
                                            <div>
                                                <h4 class="review-number">{format!("review #{}", idx + 1)}</h4>
                                                <p class="review-line">
                                                    {format!("Taken in: {}", fields.taken_in.clone().unwrap_or_else(|| "-".to_string()))}
                                                </p>
                                                <p class="review-line">
                                                    {format!("Grade received: {}", fields.your_grade.clone().unwrap_or_else(|| "-".to_string()))}
                                                </p>
                                                <p class="review-line">
                                                    {format!("Marks: {}", fields.av_plus.clone().unwrap_or_else(|| "-".to_string()))}
                                                </p>
                                                <p class="review-preview">{format!("“{}”", fields.preview_text())}</p>
                                            </div>
                                            <div class="review-card-action">
                                                <button on:click=move |_| set_selected.set(Some((idx, detail.clone())))>
                                                    { "click to see more →" }
                                                </button>
                                            </div>
                                        </div>
                                    }
                                }).collect::<Vec<_>>()}
                            </div>
                        </section>
                    </main>
                }
            })}

            {move || selected.get().map(|(idx, fields)| view! {
                <div class="modal-overlay">
                    <div class="modal-backdrop" on:click=move |_| set_selected.set(None)></div>
                    <div class="modal">
                        <h2 class="modal-title">{format!("Detailed review #{}", idx + 1)}</h2>
                        <div class="modal-fields">
                            {fields.labeled_fields().into_iter().map(|(label, value)| view! {
                                <p><span class="field-label">{label}{": "}</span>{value}</p>
                            }).collect::<Vec<_>>()}
                        </div>
                        <button class="primary" on:click=move |_| set_selected.set(None)>
                            { "← Back" }
                        </button>
                    </div>
                </div>
            })}
        </div>
    }
}
