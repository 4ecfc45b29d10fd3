#[cfg(feature = "ssr")]
mod error_impl {
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, ResponseError};
    use thiserror::Error;

    /// Server-side failure taxonomy. Handlers return these directly and the
    /// `ResponseError` impl turns them into plain-text responses whose body
    /// is the message the client alerts or renders inline.
    #[derive(Debug, Error)]
    pub enum AppError {
        #[error("database error: {0}")]
        Database(#[from] rusqlite::Error),

        #[error("not authenticated")]
        Unauthorized,

        #[error("not found")]
        NotFound,

        #[error("already bookmarked")]
        AlreadyBookmarked,

        #[error("{0}")]
        Forbidden(String),
    }

    impl ResponseError for AppError {
        fn status_code(&self) -> StatusCode {
            match self {
                AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AppError::Unauthorized => StatusCode::UNAUTHORIZED,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::AlreadyBookmarked => StatusCode::CONFLICT,
                AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            }
        }

        fn error_response(&self) -> HttpResponse {
            if let AppError::Database(e) = self {
                leptos::logging::error!("[DB] {e:?}");
            }
            HttpResponse::build(self.status_code()).body(self.to_string())
        }
    }
}

#[cfg(feature = "ssr")]
pub use error_impl::AppError;
