//! Browse-screen view state and the course list derivation pipeline.
//!
//! Everything here is pure so the pipeline can be unit tested without a
//! rendered page: the components hold a `BrowseState` in a signal and call
//! `derive_course_list` whenever any input changes.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::course::CourseListing;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CourseName,
    Prof,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// The browse screen's mutable UI state: search term, sort key/order,
/// department selection, and the open/closed dropdown flags.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BrowseState {
    pub search: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub selected_dept: Option<String>,
    pub sort_open: bool,
    pub filter_open: bool,
}

impl Default for BrowseState {
    fn default() -> Self {
        BrowseState {
            search: String::new(),
            sort_key: SortKey::CourseName,
            sort_order: SortOrder::Asc,
            selected_dept: None,
            sort_open: false,
            filter_open: false,
        }
    }
}

impl BrowseState {
    /// Choosing the active key flips the direction; choosing a new key
    /// resets to ascending. Either way the sort dropdown closes.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = match self.sort_order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Asc;
        }
        self.sort_open = false;
    }

    /// Arrow suffix shown next to the active sort option.
    pub fn sort_arrow(&self, key: SortKey) -> &'static str {
        if self.sort_key != key {
            ""
        } else if self.sort_order == SortOrder::Asc {
            " ↑"
        } else {
            " ↓"
        }
    }
}

fn sort_field<'a>(course: &'a CourseListing, key: SortKey) -> &'a str {
    match key {
        SortKey::CourseName => &course.course_name,
        SortKey::Prof => course.prof.as_deref().unwrap_or(""),
    }
}

fn matches_search(course: &CourseListing, term: &str) -> bool {
    [
        Some(course.course_code.as_str()),
        Some(course.course_name.as_str()),
        course.prof.as_deref(),
        course.nickname.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(term))
}

/// The derivation pipeline: search filter, then department filter, then a
/// stable case-insensitive sort. Equal keys keep their relative order.
pub fn derive_course_list(courses: &[CourseListing], state: &BrowseState) -> Vec<CourseListing> {
    let mut result: Vec<CourseListing> = courses.to_vec();

    let term = state.search.trim().to_lowercase();
    if !term.is_empty() {
        result.retain(|c| matches_search(c, &term));
    }

    if let Some(dept) = &state.selected_dept {
        result.retain(|c| c.course_dept.as_deref() == Some(dept.as_str()));
    }

    result.sort_by(|a, b| {
        let lhs = sort_field(a, state.sort_key).to_lowercase();
        let rhs = sort_field(b, state.sort_key).to_lowercase();
        let ordering = lhs.cmp(&rhs);
        match state.sort_order {
            SortOrder::Asc => ordering,
            // Reversing the operands keeps Ordering::Equal, so the sort
            // stays stable in both directions.
            SortOrder::Desc => match ordering {
                Ordering::Equal => Ordering::Equal,
                other => other.reverse(),
            },
        }
    });

    result
}

/// Unique departments in first-seen order, for the filter dropdown.
pub fn departments(courses: &[CourseListing]) -> Vec<String> {
    let mut seen = Vec::new();
    for course in courses {
        if let Some(dept) = &course.course_dept {
            if !seen.contains(dept) {
                seen.push(dept.clone());
            }
        }
    }
    seen
}

/// Count review rows grouped by course code. Courses missing from the map
/// default to 0 when listings are built.
pub fn review_counts(course_codes: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for code in course_codes {
        *counts.entry(code.clone()).or_insert(0) += 1;
    }
    counts
}
