use serde::{Deserialize, Serialize};

/// A user's saved-course relationship, keyed by `(user_id, course_code)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub user_id: String,
    pub course_code: String,
}

/// Client payload for adding a bookmark; the `user_id` half of the key comes
/// from the session.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookmarkRequest {
    pub course_code: String,
}
