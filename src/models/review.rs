use serde::{Deserialize, Serialize};

/// The editable field set of a review. These are the only columns a review's
/// author may change after submission; identity and course keys never move
/// through this struct.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReviewFields {
    pub taken_in: Option<String>,
    pub your_grade: Option<String>,
    pub av_plus: Option<String>,
    pub gr_comm: Option<String>,
    pub evals: Option<String>,
    pub open_book: Option<String>,
    pub attendance: Option<String>,
    pub slides: Option<String>,
    pub pr_no: Option<String>,
    pub rec: Option<String>,
    pub not_rec: Option<String>,
    pub advice: Option<String>,
    pub comments: Option<String>,
}

/// Display labels, in the order the detail modal renders them.
pub const FIELD_LABELS: [(&str, &str); 13] = [
    ("taken_in", "Taken in"),
    ("your_grade", "Grade received"),
    ("av_plus", "Total marks received"),
    ("gr_comm", "Comments on grading"),
    ("evals", "Evaluative components"),
    ("open_book", "Evaluation type"),
    ("attendance", "Attendance expectations"),
    ("slides", "Course material & slides"),
    ("pr_no", "PR No."),
    ("rec", "What worked well (why you would recommend)"),
    ("not_rec", "Things to keep in mind (why you would not recommend)"),
    ("advice", "Advice from the reviewer"),
    ("comments", "Additional comments"),
];

/// Grade options offered by the submission form.
pub const GRADE_OPTIONS: [&str; 9] = ["A", "A-", "B", "B-", "C", "C-", "D", "E", "NC"];

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ReviewFields {
    fn get(&self, key: &str) -> &Option<String> {
        match key {
            "taken_in" => &self.taken_in,
            "your_grade" => &self.your_grade,
            "av_plus" => &self.av_plus,
            "gr_comm" => &self.gr_comm,
            "evals" => &self.evals,
            "open_book" => &self.open_book,
            "attendance" => &self.attendance,
            "slides" => &self.slides,
            "pr_no" => &self.pr_no,
            "rec" => &self.rec,
            "not_rec" => &self.not_rec,
            "advice" => &self.advice,
            _ => &self.comments,
        }
    }

    /// Card preview: the first non-blank free-text field, in the order the
    /// course page quotes them, falling back to "-".
    pub fn preview_text(&self) -> String {
        non_blank(&self.rec)
            .or_else(|| non_blank(&self.not_rec))
            .or_else(|| non_blank(&self.comments))
            .or_else(|| non_blank(&self.advice))
            .or_else(|| non_blank(&self.gr_comm))
            .unwrap_or_else(|| "-".to_string())
    }

    /// Label/value pairs for the detail modal, skipping blank fields.
    pub fn labeled_fields(&self) -> Vec<(&'static str, String)> {
        FIELD_LABELS
            .iter()
            .filter_map(|&(key, label)| non_blank(self.get(key)).map(|v| (label, v)))
            .collect()
    }
}

/// A review row as returned to its author (profile listing). The author's
/// `user_id` scopes the query server-side and is never serialized back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: String,
    pub course_code: String,
    pub course_name: Option<String>,
    #[serde(flatten)]
    pub fields: ReviewFields,
}

/// Payload for submitting a new review. The author's `user_id` comes from
/// the session, never from the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewReview {
    pub course_code: String,
    pub course_name: String,
    #[serde(flatten)]
    pub fields: ReviewFields,
}
