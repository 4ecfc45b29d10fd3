//! End-to-end exercise of the browse derivation pipeline and the
//! autocomplete filter through the crate's public API, the way the browse
//! and submit pages drive them.

use coursereviews::browse::{
    departments, derive_course_list, review_counts, BrowseState, SortKey, SortOrder,
};
use coursereviews::models::course::{Course, CourseListing};
use coursereviews::suggest::{course_suggestions, ActiveField};

fn catalog() -> Vec<Course> {
    let template = Course {
        course_code: String::new(),
        course_name: String::new(),
        prof: None,
        nickname: None,
        course_dept: None,
        info: None,
        av_marks: None,
        course_total: None,
        av_grade: None,
        course_handout: None,
    };

    let mut courses = Vec::new();
    for (code, name, prof, nickname, dept) in [
        ("CS F111", "Computer Programming", "Smith", Some("CP"), "CS"),
        ("CS F211", "Data Structures & Algorithms", "Jones", Some("DSA"), "CS"),
        ("BIO F110", "Biology Laboratory", "Rao", None, "BIO"),
        ("ME F112", "Workshop Practice", "Iyer", None, "ME"),
    ] {
        let mut course = template.clone();
        course.course_code = code.to_string();
        course.course_name = name.to_string();
        course.prof = Some(prof.to_string());
        course.nickname = nickname.map(str::to_string);
        course.course_dept = Some(dept.to_string());
        courses.push(course);
    }
    courses
}

fn listings() -> Vec<CourseListing> {
    // Counts come from the single-column review projection, exactly as the
    // browse page builds them.
    let review_rows = vec![
        "CS F111".to_string(),
        "CS F111".to_string(),
        "BIO F110".to_string(),
    ];
    let counts = review_counts(&review_rows);
    catalog()
        .iter()
        .map(|c| {
            CourseListing::from_course(c, counts.get(&c.course_code).copied().unwrap_or(0))
        })
        .collect()
}

#[test]
fn counts_default_to_zero_for_unreviewed_courses() {
    let listings = listings();
    let by_code = |code: &str| {
        listings
            .iter()
            .find(|l| l.course_code == code)
            .unwrap()
            .review_count
    };
    assert_eq!(by_code("CS F111"), 2);
    assert_eq!(by_code("BIO F110"), 1);
    assert_eq!(by_code("ME F112"), 0);
}

#[test]
fn search_then_filter_then_sort() {
    let listings = listings();
    let mut state = BrowseState {
        search: "f11".into(),
        ..Default::default()
    };

    // Search hits CS F111, BIO F110 and ME F112 by code.
    let derived = derive_course_list(&listings, &state);
    assert_eq!(derived.len(), 3);

    // Department narrows the same result set.
    state.selected_dept = Some("CS".into());
    let derived = derive_course_list(&listings, &state);
    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].course_code, "CS F111");

    // Nickname search finds the course the code search would miss.
    state.search = "dsa".into();
    state.selected_dept = None;
    let derived = derive_course_list(&listings, &state);
    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].course_code, "CS F211");
}

#[test]
fn sort_toggle_round_trip() {
    let listings = listings();
    let mut state = BrowseState::default();
    state.toggle_sort(SortKey::Prof);

    let ascending: Vec<_> = derive_course_list(&listings, &state)
        .into_iter()
        .map(|c| c.prof.unwrap())
        .collect();
    assert_eq!(ascending, vec!["Iyer", "Jones", "Rao", "Smith"]);

    state.toggle_sort(SortKey::Prof);
    assert_eq!(state.sort_order, SortOrder::Desc);
    let descending: Vec<_> = derive_course_list(&listings, &state)
        .into_iter()
        .map(|c| c.prof.unwrap())
        .collect();
    assert_eq!(descending, vec!["Smith", "Rao", "Jones", "Iyer"]);

    // A third toggle lands back on the original ascending order.
    state.toggle_sort(SortKey::Prof);
    let again: Vec<_> = derive_course_list(&listings, &state)
        .into_iter()
        .map(|c| c.prof.unwrap())
        .collect();
    assert_eq!(again, ascending);
}

#[test]
fn department_dropdown_lists_each_department_once() {
    assert_eq!(
        departments(&listings()),
        vec!["CS".to_string(), "BIO".to_string(), "ME".to_string()]
    );
}

#[test]
fn suggestion_selection_flow() {
    let courses = catalog();

    // Typing into the code field.
    let hits = course_suggestions(&courses, ActiveField::Code, "cs f2", "");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].course_code, "CS F211");

    // Typing an abbreviation into the name field.
    let hits = course_suggestions(&courses, ActiveField::Name, "", "cp");
    assert!(hits.iter().any(|c| c.course_code == "CS F111"));

    // Selecting fills both inputs from the chosen course.
    let chosen = &hits[0];
    assert_eq!(chosen.course_code, "CS F111");
    assert_eq!(chosen.course_name, "Computer Programming");
}
