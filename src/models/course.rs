use serde::{Deserialize, Serialize};

/// A catalog entry as stored in the `courses` table. Courses are read-only
/// from the UI; rows are ingested through the admin upsert endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    pub prof: Option<String>,
    pub nickname: Option<String>,
    pub course_dept: Option<String>,
    pub info: Option<String>,
    pub av_marks: Option<String>,
    pub course_total: Option<String>,
    pub av_grade: Option<String>,
    pub course_handout: Option<String>,
}

/// Browse-screen projection of a course plus its derived review count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CourseListing {
    pub course_code: String,
    pub course_name: String,
    pub prof: Option<String>,
    pub nickname: Option<String>,
    pub course_dept: Option<String>,
    pub review_count: usize,
}

impl CourseListing {
    pub fn from_course(course: &Course, review_count: usize) -> Self {
        CourseListing {
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            prof: course.prof.clone(),
            nickname: course.nickname.clone(),
            course_dept: course.course_dept.clone(),
            review_count,
        }
    }
}
