//! Browser-target checks for the autocomplete filter, runnable with
//! `wasm-pack test --headless --chrome`. Compiles to nothing on native.
#![cfg(target_arch = "wasm32")]

use coursereviews::models::course::Course;
use coursereviews::suggest::{course_suggestions, ActiveField};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn course(code: &str, name: &str, nickname: Option<&str>) -> Course {
    Course {
        course_code: code.to_string(),
        course_name: name.to_string(),
        prof: None,
        nickname: nickname.map(str::to_string),
        course_dept: None,
        info: None,
        av_marks: None,
        course_total: None,
        av_grade: None,
        course_handout: None,
    }
}

#[wasm_bindgen_test]
fn code_query_filters_in_the_browser_too() {
    let courses = vec![
        course("CS F111", "Computer Programming", Some("CP")),
        course("BIO F110", "Biology Laboratory", None),
    ];
    let hits = course_suggestions(&courses, ActiveField::Code, "bio", "");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].course_code, "BIO F110");
}

#[wasm_bindgen_test]
fn nickname_query_matches_name_field() {
    let courses = vec![course("CS F111", "Computer Programming", Some("CP"))];
    let hits = course_suggestions(&courses, ActiveField::Name, "", "cp");
    assert_eq!(hits.len(), 1);
}
