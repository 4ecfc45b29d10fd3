//! Typed fetch helpers for the WASM side. Every page talks to the
//! table-level API through these, so the error mapping (401 → redirect,
//! 409 → "already bookmarked", anything else → the backend's message)
//! lives in exactly one place.

use std::collections::HashMap;

use gloo_net::http::{Request, Response};
use thiserror::Error;

use crate::models::bookmark::BookmarkRequest;
use crate::models::course::{Course, CourseListing};
use crate::models::review::{NewReview, Review, ReviewFields};
use crate::models::session::{LoginRequest, SessionUser};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("already bookmarked")]
    AlreadyBookmarked,

    #[error("{message}")]
    Api { status: u16, message: String },
}

impl From<gloo_net::Error> for ClientError {
    fn from(e: gloo_net::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    if response.ok() {
        return Ok(response);
    }
    match response.status() {
        401 => Err(ClientError::NotAuthenticated),
        409 => Err(ClientError::AlreadyBookmarked),
        status => {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api { status, message })
        }
    }
}

// ---- identity ----

pub async fn current_session() -> Result<Option<SessionUser>, ClientError> {
    let response = Request::get("/api/session").send().await?;
    match check(response).await {
        Ok(response) => Ok(Some(response.json().await?)),
        Err(ClientError::NotAuthenticated) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn sign_in(email: &str) -> Result<SessionUser, ClientError> {
    let request = LoginRequest {
        email: email.to_string(),
    };
    let response = Request::post("/api/login").json(&request)?.send().await?;
    Ok(check(response).await?.json().await?)
}

pub async fn sign_out() -> Result<(), ClientError> {
    let response = Request::post("/api/logout").send().await?;
    check(response).await?;
    Ok(())
}

// ---- courses ----

pub async fn fetch_courses() -> Result<Vec<Course>, ClientError> {
    let response = Request::get("/api/courses").send().await?;
    Ok(check(response).await?.json().await?)
}

pub async fn fetch_course(course_code: &str) -> Result<Option<Course>, ClientError> {
    let url = format!("/api/courses/{}", urlencoding::encode(course_code));
    let response = Request::get(&url).send().await?;
    match check(response).await {
        Ok(response) => Ok(Some(response.json().await?)),
        Err(ClientError::Api { status: 404, .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn fetch_review_counts() -> Result<HashMap<String, usize>, ClientError> {
    let response = Request::get("/api/review-counts").send().await?;
    Ok(check(response).await?.json().await?)
}

/// Browse input: the full course list merged with per-course review counts,
/// both fetched concurrently. Courses with no reviews count as 0.
pub async fn fetch_course_listings() -> Result<Vec<CourseListing>, ClientError> {
    let (courses, counts) = futures::future::join(fetch_courses(), fetch_review_counts()).await;
    let courses = courses?;
    let counts = counts?;
    Ok(courses
        .iter()
        .map(|c| CourseListing::from_course(c, counts.get(&c.course_code).copied().unwrap_or(0)))
        .collect())
}

// ---- reviews ----

pub async fn fetch_course_reviews(course_code: &str) -> Result<Vec<ReviewFields>, ClientError> {
    let url = format!("/api/courses/{}/reviews", urlencoding::encode(course_code));
    let response = Request::get(&url).send().await?;
    Ok(check(response).await?.json().await?)
}

pub async fn fetch_my_reviews() -> Result<Vec<Review>, ClientError> {
    let response = Request::get("/api/my/reviews").send().await?;
    Ok(check(response).await?.json().await?)
}

pub async fn submit_review(review: &NewReview) -> Result<(), ClientError> {
    let response = Request::post("/api/reviews").json(review)?.send().await?;
    check(response).await?;
    Ok(())
}

pub async fn update_review(review_id: &str, fields: &ReviewFields) -> Result<(), ClientError> {
    let url = format!("/api/reviews/{}", urlencoding::encode(review_id));
    let response = Request::put(&url).json(fields)?.send().await?;
    check(response).await?;
    Ok(())
}

pub async fn delete_review(review_id: &str) -> Result<(), ClientError> {
    let url = format!("/api/reviews/{}", urlencoding::encode(review_id));
    let response = Request::delete(&url).send().await?;
    check(response).await?;
    Ok(())
}

// ---- bookmarks ----

pub async fn fetch_bookmarks() -> Result<Vec<Course>, ClientError> {
    let response = Request::get("/api/my/bookmarks").send().await?;
    Ok(check(response).await?.json().await?)
}

pub async fn add_bookmark(course_code: &str) -> Result<(), ClientError> {
    let request = BookmarkRequest {
        course_code: course_code.to_string(),
    };
    let response = Request::post("/api/bookmarks").json(&request)?.send().await?;
    check(response).await?;
    Ok(())
}

pub async fn remove_bookmark(course_code: &str) -> Result<(), ClientError> {
    let url = format!("/api/bookmarks/{}", urlencoding::encode(course_code));
    let response = Request::delete(&url).send().await?;
    check(response).await?;
    Ok(())
}
