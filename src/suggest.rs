//! Autocomplete for the submit-review course inputs.
//!
//! Suggestions are computed by filtering the already-loaded course list, so
//! typing never issues a network request. Which input has focus decides the
//! match field: the code input matches on course code, the name input on
//! course name or nickname.

use serde::{Deserialize, Serialize};

use crate::models::course::Course;

/// Which of the two course inputs currently drives the suggestion list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveField {
    Code,
    Name,
}

/// Case-insensitive substring filter over the course list. An empty query
/// matches every course, which is what makes the list show up on focus.
pub fn course_suggestions(
    courses: &[Course],
    field: ActiveField,
    code_input: &str,
    name_input: &str,
) -> Vec<Course> {
    let code_q = code_input.to_lowercase();
    let name_q = name_input.to_lowercase();

    courses
        .iter()
        .filter(|c| match field {
            ActiveField::Code => c.course_code.to_lowercase().contains(&code_q),
            ActiveField::Name => {
                c.course_name.to_lowercase().contains(&name_q)
                    || c.nickname
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(&name_q))
                        .unwrap_or(false)
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn code_field_matches_code_substring() {
        let courses = vec![
            course("CS F111", "Computer Programming", Some("CP")),
            course("BIO F110", "Biology Laboratory", None),
        ];
        let hits = course_suggestions(&courses, ActiveField::Code, "f11", "");
        assert_eq!(hits.len(), 2);

        let hits = course_suggestions(&courses, ActiveField::Code, "cs", "");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course_code, "CS F111");
    }

    #[test]
    fn name_field_matches_name_or_nickname() {
        let courses = vec![
            course("CS F111", "Computer Programming", Some("CP")),
            course("BIO F110", "Biology Laboratory", None),
        ];
        let hits = course_suggestions(&courses, ActiveField::Name, "", "cp");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course_code, "CS F111");

        let hits = course_suggestions(&courses, ActiveField::Name, "", "laboratory");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course_code, "BIO F110");
    }

    #[test]
    fn active_field_decides_which_query_applies() {
        let courses = vec![course("CS F111", "Computer Programming", None)];
        // The name query would not match the code, but the code field is
        // active so only the code query is consulted.
        let hits = course_suggestions(&courses, ActiveField::Code, "cs", "zzz");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn empty_query_matches_everything() {
        let courses = vec![
            course("CS F111", "Computer Programming", None),
            course("BIO F110", "Biology Laboratory", None),
        ];
        assert_eq!(course_suggestions(&courses, ActiveField::Name, "", "").len(), 2);
    }
}
