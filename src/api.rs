#[cfg(feature = "ssr")]
mod api_impl {
    use crate::browse;
    use crate::db::Database;
    use crate::error::AppError;
    use crate::models::bookmark::BookmarkRequest;
    use crate::models::course::Course;
    use crate::models::review::{NewReview, ReviewFields};
    use crate::models::session::{email_allowed, LoginRequest, SessionUser, DEFAULT_EMAIL_DOMAIN};
    use actix_web::cookie::{Cookie, SameSite};
    use actix_web::{web, HttpRequest, HttpResponse};
    use leptos::logging::log;

    pub const SESSION_COOKIE: &str = "session";

    pub fn allowed_email_domain() -> String {
        std::env::var("ALLOWED_EMAIL_DOMAIN").unwrap_or_else(|_| DEFAULT_EMAIL_DOMAIN.to_string())
    }

    /// Resolves the session cookie to its user, or `Unauthorized`. Screens
    /// treat this as their precondition check; the queries behind each
    /// handler are additionally scoped by the returned `user_id`.
    async fn require_session(req: &HttpRequest, db: &Database) -> Result<SessionUser, AppError> {
        let token = req.cookie(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;
        db.session_user(token.value())
            .await?
            .ok_or(AppError::Unauthorized)
    }

    fn session_cookie(token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }

    // ---- identity ----

    pub async fn current_session(
        req: HttpRequest,
        db: web::Data<Database>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        Ok(HttpResponse::Ok().json(user))
    }

    pub async fn sign_in(
        db: web::Data<Database>,
        request: web::Json<LoginRequest>,
    ) -> Result<HttpResponse, AppError> {
        let email = request.email.trim().to_lowercase();
        let domain = allowed_email_domain();
        if !email_allowed(&email, &domain) {
            log!("[API] Sign-in rejected for {}", email);
            return Err(AppError::Forbidden(format!(
                "Only {} emails are allowed.",
                domain
            )));
        }

        let (user, token) = db.sign_in(&email).await?;
        log!("[API] Signed in {}", user.email);
        Ok(HttpResponse::Ok().cookie(session_cookie(token)).json(user))
    }

    pub async fn sign_out(
        req: HttpRequest,
        db: web::Data<Database>,
    ) -> Result<HttpResponse, AppError> {
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            db.sign_out(cookie.value()).await?;
        }
        let mut expired = session_cookie(String::new());
        expired.make_removal();
        Ok(HttpResponse::Ok().cookie(expired).finish())
    }

    // ---- courses ----

    pub async fn list_courses(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
        let courses = db.get_courses().await?;
        log!("[API] Returning {} courses", courses.len());
        Ok(HttpResponse::Ok().json(courses))
    }

    pub async fn get_course(
        db: web::Data<Database>,
        course_code: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let course = db
            .get_course(&course_code)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(HttpResponse::Ok().json(course))
    }

    /// Administration surface only: the UI never writes to `courses`.
    pub async fn upsert_course(
        db: web::Data<Database>,
        course: web::Json<Course>,
    ) -> Result<HttpResponse, AppError> {
        db.upsert_course(&course).await?;
        Ok(HttpResponse::Ok().json(course.into_inner()))
    }

    // ---- reviews ----

    pub async fn course_reviews(
        db: web::Data<Database>,
        course_code: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let reviews = db.reviews_for_course(&course_code).await?;
        Ok(HttpResponse::Ok().json(reviews))
    }

    /// Per-course review counts, derived from a single-column projection.
    pub async fn review_counts(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
        let codes = db.review_course_codes().await?;
        Ok(HttpResponse::Ok().json(browse::review_counts(&codes)))
    }

    pub async fn my_reviews(
        req: HttpRequest,
        db: web::Data<Database>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        let reviews = db.reviews_for_user(&user.user_id).await?;
        log!("[API] Returning {} reviews for {}", reviews.len(), user.email);
        Ok(HttpResponse::Ok().json(reviews))
    }

    pub async fn create_review(
        req: HttpRequest,
        db: web::Data<Database>,
        review: web::Json<NewReview>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        let raw_json = serde_json::to_string(&*review).unwrap_or_default();
        log!("[API] Raw review JSON: {}", raw_json);

        let review_id = db.insert_review(&user.user_id, &review).await?;
        log!("[API] Review {} submitted by {}", review_id, user.email);
        Ok(HttpResponse::Ok().json(review_id))
    }

    pub async fn update_review(
        req: HttpRequest,
        db: web::Data<Database>,
        review_id: web::Path<String>,
        fields: web::Json<ReviewFields>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        db.update_review(&user.user_id, &review_id, &fields).await?;
        Ok(HttpResponse::Ok().finish())
    }

    pub async fn delete_review(
        req: HttpRequest,
        db: web::Data<Database>,
        review_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        db.delete_review(&user.user_id, &review_id).await?;
        Ok(HttpResponse::Ok().finish())
    }

    // ---- bookmarks ----

    pub async fn my_bookmarks(
        req: HttpRequest,
        db: web::Data<Database>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        let courses = db.bookmarked_courses(&user.user_id).await?;
        Ok(HttpResponse::Ok().json(courses))
    }

    pub async fn add_bookmark(
        req: HttpRequest,
        db: web::Data<Database>,
        request: web::Json<BookmarkRequest>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        db.add_bookmark(&user.user_id, &request.course_code).await?;
        log!("[API] {} bookmarked {}", user.email, request.course_code);
        Ok(HttpResponse::Ok().finish())
    }

    pub async fn remove_bookmark(
        req: HttpRequest,
        db: web::Data<Database>,
        course_code: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let user = require_session(&req, &db).await?;
        db.remove_bookmark(&user.user_id, &course_code).await?;
        Ok(HttpResponse::Ok().finish())
    }
}

#[cfg(feature = "ssr")]
pub use api_impl::*;
