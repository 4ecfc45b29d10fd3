use leptos::*;

use crate::models::review::{ReviewFields, GRADE_OPTIONS};

type Getter = fn(&ReviewFields) -> &Option<String>;
type Setter = fn(&mut ReviewFields, Option<String>);

fn current(draft: RwSignal<ReviewFields>, get: Getter) -> String {
    draft.with(move |d| get(d).clone().unwrap_or_default())
}

fn text_input(
    draft: RwSignal<ReviewFields>,
    label: &'static str,
    placeholder: &'static str,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                placeholder=placeholder
                prop:value=move || current(draft, get)
                on:input=move |e| draft.update(|d| set(d, Some(event_target_value(&e))))
            />
        </label>
    }
}

fn text_area(
    draft: RwSignal<ReviewFields>,
    label: &'static str,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <textarea
                prop:value=move || current(draft, get)
                on:input=move |e| draft.update(|d| set(d, Some(event_target_value(&e))))
            ></textarea>
        </label>
    }
}

/// The 13 editable review fields, shared verbatim between the submission
/// form and the profile edit modal so the two can never drift apart.
#[component]
pub fn ReviewFieldsForm(draft: RwSignal<ReviewFields>) -> impl IntoView {
    view! {
        <div class="review-form">
            {text_input(draft, "Taken in", "e.g., 2024-25 Sem 1",
                |d| &d.taken_in, |d, v| d.taken_in = v)}

            <label class="field">
                <span class="field-label">{ "Grade received" }</span>
                <select
                    prop:value=move || current(draft, |d| &d.your_grade)
                    on:change=move |e| draft.update(|d| d.your_grade = Some(event_target_value(&e)))
                >
                    <option value="">{ "Select" }</option>
                    {GRADE_OPTIONS.iter().map(|grade| view! {
                        <option value=*grade>{*grade}</option>
                    }).collect::<Vec<_>>()}
                </select>
            </label>

            {text_input(draft, "Total marks received", "",
                |d| &d.av_plus, |d, v| d.av_plus = v)}
            {text_area(draft, "Comments on grading",
                |d| &d.gr_comm, |d, v| d.gr_comm = v)}
            {text_input(draft, "Evaluative components", "",
                |d| &d.evals, |d, v| d.evals = v)}
            {text_input(draft, "Evaluation type", "",
                |d| &d.open_book, |d, v| d.open_book = v)}
            {text_area(draft, "Attendance expectations",
                |d| &d.attendance, |d, v| d.attendance = v)}
            {text_area(draft, "Course material & slides",
                |d| &d.slides, |d, v| d.slides = v)}
            {text_input(draft, "PR No.", "",
                |d| &d.pr_no, |d, v| d.pr_no = v)}
            {text_area(draft, "What worked well (why you would recommend)",
                |d| &d.rec, |d, v| d.rec = v)}
            {text_area(draft, "Things to keep in mind (why you would not recommend)",
                |d| &d.not_rec, |d, v| d.not_rec = v)}
            {text_area(draft, "Advice from the reviewer",
                |d| &d.advice, |d, v| d.advice = v)}
            {text_area(draft, "Additional comments",
                |d| &d.comments, |d, v| d.comments = v)}
        </div>
    }
}
