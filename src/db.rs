#[cfg(feature = "ssr")]
mod db_impl {
    use crate::error::AppError;
    use crate::models::course::Course;
    use crate::models::review::{NewReview, Review, ReviewFields};
    use crate::models::session::SessionUser;
    use chrono::{DateTime, Duration, SecondsFormat, Utc};
    use leptos::logging::log;
    use rusqlite::{params, Connection, ErrorCode, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    /// Sessions older than this are treated as absent.
    const SESSION_MAX_AGE_DAYS: i64 = 30;

    /// Table-level access to the relational store. Every public method is a
    /// single filtered/ordered query or a single insert/update/delete; all
    /// ownership scoping happens in the WHERE clauses.
    #[derive(Debug, Clone)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    fn now_rfc3339() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
        Ok(Course {
            course_code: row.get(0)?,
            course_name: row.get(1)?,
            prof: row.get(2)?,
            nickname: row.get(3)?,
            course_dept: row.get(4)?,
            info: row.get(5)?,
            av_marks: row.get(6)?,
            course_total: row.get(7)?,
            av_grade: row.get(8)?,
            course_handout: row.get(9)?,
        })
    }

    fn fields_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<ReviewFields> {
        Ok(ReviewFields {
            taken_in: row.get(offset)?,
            your_grade: row.get(offset + 1)?,
            av_plus: row.get(offset + 2)?,
            gr_comm: row.get(offset + 3)?,
            evals: row.get(offset + 4)?,
            open_book: row.get(offset + 5)?,
            attendance: row.get(offset + 6)?,
            slides: row.get(offset + 7)?,
            pr_no: row.get(offset + 8)?,
            rec: row.get(offset + 9)?,
            not_rec: row.get(offset + 10)?,
            advice: row.get(offset + 11)?,
            comments: row.get(offset + 12)?,
        })
    }

    const FIELD_COLUMNS: &str = "taken_in, your_grade, av_plus, gr_comm, evals, open_book, \
         attendance, slides, pr_no, rec, not_rec, advice, comments";

    impl Database {
        pub fn new(db_path: &str) -> Result<Self, AppError> {
            let conn = Connection::open(db_path)?;
            log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<(), AppError> {
            let conn = self.conn.lock().await;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS courses (
                    course_code TEXT PRIMARY KEY,
                    course_name TEXT NOT NULL,
                    prof TEXT,
                    nickname TEXT,
                    course_dept TEXT,
                    info TEXT,
                    av_marks TEXT,
                    course_total TEXT,
                    av_grade TEXT,
                    course_handout TEXT
                );",
            )?;

            // No foreign key on course_code: a review for an unseen course
            // still inserts, matching the original data model.
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    review_id TEXT PRIMARY KEY,
                    course_code TEXT NOT NULL,
                    course_name TEXT,
                    user_id TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    taken_in TEXT,
                    your_grade TEXT,
                    av_plus TEXT,
                    gr_comm TEXT,
                    evals TEXT,
                    open_book TEXT,
                    attendance TEXT,
                    slides TEXT,
                    pr_no TEXT,
                    rec TEXT,
                    not_rec TEXT,
                    advice TEXT,
                    comments TEXT
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_course ON reviews(course_code);
                CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews(user_id);",
            )?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS bookmarks (
                    user_id TEXT NOT NULL,
                    course_code TEXT NOT NULL,
                    PRIMARY KEY (user_id, course_code)
                );",
            )?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    user_id TEXT PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE
                );
                CREATE TABLE IF NOT EXISTS sessions (
                    token TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    email TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );",
            )?;

            Ok(())
        }

        // ---- courses ----

        pub async fn upsert_course(&self, course: &Course) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO courses (course_code, course_name, prof, nickname, course_dept,
                    info, av_marks, course_total, av_grade, course_handout)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(course_code) DO UPDATE SET
                    course_name = excluded.course_name,
                    prof = excluded.prof,
                    nickname = excluded.nickname,
                    course_dept = excluded.course_dept,
                    info = excluded.info,
                    av_marks = excluded.av_marks,
                    course_total = excluded.course_total,
                    av_grade = excluded.av_grade,
                    course_handout = excluded.course_handout",
                params![
                    course.course_code,
                    course.course_name,
                    course.prof,
                    course.nickname,
                    course.course_dept,
                    course.info,
                    course.av_marks,
                    course.course_total,
                    course.av_grade,
                    course.course_handout,
                ],
            )?;
            log!("[DB] Course upserted: {}", course.course_code);
            Ok(())
        }

        pub async fn get_courses(&self) -> Result<Vec<Course>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT course_code, course_name, prof, nickname, course_dept,
                        info, av_marks, course_total, av_grade, course_handout
                 FROM courses",
            )?;
            let rows = stmt.query_map([], course_from_row)?;
            let mut courses = Vec::new();
            for row in rows {
                courses.push(row?);
            }
            Ok(courses)
        }

        pub async fn get_course(&self, course_code: &str) -> Result<Option<Course>, AppError> {
            let conn = self.conn.lock().await;
            let result = conn.query_row(
                "SELECT course_code, course_name, prof, nickname, course_dept,
                        info, av_marks, course_total, av_grade, course_handout
                 FROM courses WHERE course_code = ?",
                [course_code],
                course_from_row,
            );
            match result {
                Ok(course) => Ok(Some(course)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        // ---- reviews ----

        /// Projection used to build the browse screen's per-course counts.
        pub async fn review_course_codes(&self) -> Result<Vec<String>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare("SELECT course_code FROM reviews")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            let mut codes = Vec::new();
            for row in rows {
                codes.push(row?);
            }
            Ok(codes)
        }

        /// Display fields only: review and author ids never leave the server
        /// except through the owner's own listing.
        pub async fn reviews_for_course(
            &self,
            course_code: &str,
        ) -> Result<Vec<ReviewFields>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&format!(
                "SELECT {FIELD_COLUMNS} FROM reviews WHERE course_code = ?"
            ))?;
            let rows = stmt.query_map([course_code], |row| fields_from_row(row, 0))?;
            let mut reviews = Vec::new();
            for row in rows {
                reviews.push(row?);
            }
            Ok(reviews)
        }

        pub async fn reviews_for_user(&self, user_id: &str) -> Result<Vec<Review>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&format!(
                "SELECT review_id, course_code, course_name, {FIELD_COLUMNS}
                 FROM reviews WHERE user_id = ?
                 ORDER BY created_at DESC"
            ))?;
            let rows = stmt.query_map([user_id], |row| {
                Ok(Review {
                    review_id: row.get(0)?,
                    course_code: row.get(1)?,
                    course_name: row.get(2)?,
                    fields: fields_from_row(row, 3)?,
                })
            })?;
            let mut reviews = Vec::new();
            for row in rows {
                reviews.push(row?);
            }
            Ok(reviews)
        }

        pub async fn insert_review(
            &self,
            user_id: &str,
            review: &NewReview,
        ) -> Result<String, AppError> {
            let review_id = Uuid::new_v4().to_string();
            let conn = self.conn.lock().await;
            conn.execute(
                &format!(
                    "INSERT INTO reviews (review_id, course_code, course_name, user_id,
                        created_at, {FIELD_COLUMNS})
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
                ),
                params![
                    review_id,
                    review.course_code,
                    review.course_name,
                    user_id,
                    now_rfc3339(),
                    review.fields.taken_in,
                    review.fields.your_grade,
                    review.fields.av_plus,
                    review.fields.gr_comm,
                    review.fields.evals,
                    review.fields.open_book,
                    review.fields.attendance,
                    review.fields.slides,
                    review.fields.pr_no,
                    review.fields.rec,
                    review.fields.not_rec,
                    review.fields.advice,
                    review.fields.comments,
                ],
            )?;
            log!("[DB] Review {} inserted for {}", review_id, review.course_code);
            Ok(review_id)
        }

        /// Partial update of exactly the editable field set, scoped to the
        /// author. The key columns are untouched by construction.
        pub async fn update_review(
            &self,
            user_id: &str,
            review_id: &str,
            fields: &ReviewFields,
        ) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            let updated = conn.execute(
                "UPDATE reviews SET
                    taken_in = ?, your_grade = ?, av_plus = ?, gr_comm = ?, evals = ?,
                    open_book = ?, attendance = ?, slides = ?, pr_no = ?, rec = ?,
                    not_rec = ?, advice = ?, comments = ?
                 WHERE review_id = ? AND user_id = ?",
                params![
                    fields.taken_in,
                    fields.your_grade,
                    fields.av_plus,
                    fields.gr_comm,
                    fields.evals,
                    fields.open_book,
                    fields.attendance,
                    fields.slides,
                    fields.pr_no,
                    fields.rec,
                    fields.not_rec,
                    fields.advice,
                    fields.comments,
                    review_id,
                    user_id,
                ],
            )?;
            if updated == 0 {
                return Err(AppError::NotFound);
            }
            log!("[DB] Review {} updated", review_id);
            Ok(())
        }

        pub async fn delete_review(&self, user_id: &str, review_id: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute(
                "DELETE FROM reviews WHERE review_id = ? AND user_id = ?",
                [review_id, user_id],
            )?;
            if deleted == 0 {
                return Err(AppError::NotFound);
            }
            log!("[DB] Review {} deleted", review_id);
            Ok(())
        }

        // ---- bookmarks ----

        pub async fn add_bookmark(&self, user_id: &str, course_code: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            let inserted = conn.execute(
                "INSERT INTO bookmarks (user_id, course_code) VALUES (?, ?)",
                [user_id, course_code],
            );
            match inserted {
                Ok(_) => {
                    log!("[DB] Bookmark added: {} -> {}", user_id, course_code);
                    Ok(())
                }
                // Only a composite-key violation means "already bookmarked";
                // every other failure keeps its own message.
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    Err(AppError::AlreadyBookmarked)
                }
                Err(e) => Err(e.into()),
            }
        }

        pub async fn remove_bookmark(
            &self,
            user_id: &str,
            course_code: &str,
        ) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            conn.execute(
                "DELETE FROM bookmarks WHERE user_id = ? AND course_code = ?",
                [user_id, course_code],
            )?;
            log!("[DB] Bookmark removed: {} -> {}", user_id, course_code);
            Ok(())
        }

        pub async fn bookmarked_courses(&self, user_id: &str) -> Result<Vec<Course>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT c.course_code, c.course_name, c.prof, c.nickname, c.course_dept,
                        c.info, c.av_marks, c.course_total, c.av_grade, c.course_handout
                 FROM bookmarks b
                 JOIN courses c ON c.course_code = b.course_code
                 WHERE b.user_id = ?",
            )?;
            let rows = stmt.query_map([user_id], course_from_row)?;
            let mut courses = Vec::new();
            for row in rows {
                courses.push(row?);
            }
            Ok(courses)
        }

        // ---- identity ----

        /// Creates the user row on first sign-in, then a fresh session.
        /// Returns the session token to be set as a cookie.
        pub async fn sign_in(&self, email: &str) -> Result<(SessionUser, String), AppError> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT OR IGNORE INTO users (user_id, email) VALUES (?, ?)",
                [&Uuid::new_v4().to_string(), &email.to_string()],
            )?;
            let user_id: String = tx.query_row(
                "SELECT user_id FROM users WHERE email = ?",
                [email],
                |row| row.get(0),
            )?;

            let token = Uuid::new_v4().to_string();
            tx.execute(
                "INSERT INTO sessions (token, user_id, email, created_at) VALUES (?, ?, ?, ?)",
                [&token, &user_id, &email.to_string(), &now_rfc3339()],
            )?;
            tx.commit()?;

            log!("[DB] Session opened for {}", email);
            Ok((
                SessionUser {
                    user_id,
                    email: email.to_string(),
                },
                token,
            ))
        }

        pub async fn session_user(&self, token: &str) -> Result<Option<SessionUser>, AppError> {
            let conn = self.conn.lock().await;
            let result = conn.query_row(
                "SELECT user_id, email, created_at FROM sessions WHERE token = ?",
                [token],
                |row| {
                    Ok((
                        SessionUser {
                            user_id: row.get(0)?,
                            email: row.get(1)?,
                        },
                        row.get::<_, String>(2)?,
                    ))
                },
            );
            match result {
                Ok((user, created_at)) => {
                    let expired = DateTime::parse_from_rfc3339(&created_at)
                        .map(|t| {
                            Utc::now() - t.with_timezone(&Utc)
                                > Duration::days(SESSION_MAX_AGE_DAYS)
                        })
                        .unwrap_or(true);
                    if expired {
                        conn.execute("DELETE FROM sessions WHERE token = ?", [token])?;
                        return Ok(None);
                    }
                    Ok(Some(user))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        pub async fn sign_out(&self, token: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            conn.execute("DELETE FROM sessions WHERE token = ?", [token])?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        async fn create_test_db() -> Database {
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            db
        }

        fn test_course(code: &str) -> Course {
            Course {
                course_code: code.to_string(),
                course_name: format!("{} name", code),
                prof: Some("Smith".into()),
                nickname: None,
                course_dept: Some("CS".into()),
                info: Some("An introductory course.".into()),
                av_marks: Some("62".into()),
                course_total: Some("200".into()),
                av_grade: Some("B".into()),
                course_handout: None,
            }
        }

        fn test_review(code: &str) -> NewReview {
            NewReview {
                course_code: code.to_string(),
                course_name: format!("{} name", code),
                fields: ReviewFields {
                    taken_in: Some("2024-25 Sem 1".into()),
                    your_grade: Some("A".into()),
                    rec: Some("well structured".into()),
                    ..Default::default()
                },
            }
        }

        #[tokio::test]
        async fn test_schema_creation() {
            let db = create_test_db().await;

            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

            assert!(tables.contains(&"courses".to_string()));
            assert!(tables.contains(&"reviews".to_string()));
            assert!(tables.contains(&"bookmarks".to_string()));
            assert!(tables.contains(&"users".to_string()));
            assert!(tables.contains(&"sessions".to_string()));
        }

        #[tokio::test]
        async fn test_course_upsert_and_lookup() {
            let db = create_test_db().await;
            db.upsert_course(&test_course("CS F111")).await.unwrap();

            let fetched = db.get_course("CS F111").await.unwrap().unwrap();
            assert_eq!(fetched.course_name, "CS F111 name");

            // Upsert replaces attributes without duplicating the row.
            let mut updated = test_course("CS F111");
            updated.prof = Some("Jones".into());
            db.upsert_course(&updated).await.unwrap();
            let courses = db.get_courses().await.unwrap();
            assert_eq!(courses.len(), 1);
            assert_eq!(courses[0].prof.as_deref(), Some("Jones"));

            assert!(db.get_course("ME F112").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_review_lifecycle() {
            let db = create_test_db().await;
            let review_id = db
                .insert_review("user-1", &test_review("CS F111"))
                .await
                .unwrap();

            let for_course = db.reviews_for_course("CS F111").await.unwrap();
            assert_eq!(for_course.len(), 1);
            assert_eq!(for_course[0].your_grade.as_deref(), Some("A"));

            let mine = db.reviews_for_user("user-1").await.unwrap();
            assert_eq!(mine.len(), 1);
            assert_eq!(mine[0].review_id, review_id);

            let mut fields = mine[0].fields.clone();
            fields.your_grade = Some("B".into());
            db.update_review("user-1", &review_id, &fields).await.unwrap();

            let mine = db.reviews_for_user("user-1").await.unwrap();
            assert_eq!(mine[0].fields.your_grade.as_deref(), Some("B"));
            // The key columns survive the partial update untouched.
            assert_eq!(mine[0].review_id, review_id);
            assert_eq!(mine[0].course_code, "CS F111");

            db.delete_review("user-1", &review_id).await.unwrap();
            assert!(db.reviews_for_user("user-1").await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_reviews_scoped_to_owner() {
            let db = create_test_db().await;
            let review_id = db
                .insert_review("user-1", &test_review("CS F111"))
                .await
                .unwrap();
            db.insert_review("user-2", &test_review("CS F111"))
                .await
                .unwrap();

            assert_eq!(db.reviews_for_user("user-1").await.unwrap().len(), 1);

            // Another user can neither edit nor delete the row.
            let result = db
                .update_review("user-2", &review_id, &ReviewFields::default())
                .await;
            assert!(matches!(result, Err(AppError::NotFound)));
            let result = db.delete_review("user-2", &review_id).await;
            assert!(matches!(result, Err(AppError::NotFound)));

            // Owner deletion removes exactly one row; the other author's
            // review of the same course survives.
            db.delete_review("user-1", &review_id).await.unwrap();
            assert_eq!(db.reviews_for_course("CS F111").await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_my_reviews_newest_first() {
            let db = create_test_db().await;
            db.insert_review("user-1", &test_review("CS F111"))
                .await
                .unwrap();
            let second = db
                .insert_review("user-1", &test_review("ME F112"))
                .await
                .unwrap();

            let mine = db.reviews_for_user("user-1").await.unwrap();
            assert_eq!(mine[0].review_id, second);
        }

        #[tokio::test]
        async fn test_review_for_unseen_course_still_inserts() {
            // Known gap carried over from the original data model: no
            // referential check between reviews and the course catalog.
            let db = create_test_db().await;
            db.insert_review("user-1", &test_review("XX F999"))
                .await
                .unwrap();
            assert_eq!(db.reviews_for_course("XX F999").await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_bookmark_duplicate_rejected() {
            let db = create_test_db().await;
            db.upsert_course(&test_course("CS F111")).await.unwrap();

            db.add_bookmark("user-1", "CS F111").await.unwrap();
            let result = db.add_bookmark("user-1", "CS F111").await;
            assert!(matches!(result, Err(AppError::AlreadyBookmarked)));

            // The same course is independently bookmarkable by another user.
            db.add_bookmark("user-2", "CS F111").await.unwrap();
        }

        #[tokio::test]
        async fn test_bookmark_join_and_removal() {
            let db = create_test_db().await;
            db.upsert_course(&test_course("CS F111")).await.unwrap();
            db.upsert_course(&test_course("ME F112")).await.unwrap();
            db.add_bookmark("user-1", "CS F111").await.unwrap();
            db.add_bookmark("user-1", "ME F112").await.unwrap();

            let saved = db.bookmarked_courses("user-1").await.unwrap();
            assert_eq!(saved.len(), 2);

            db.remove_bookmark("user-1", "CS F111").await.unwrap();
            let saved = db.bookmarked_courses("user-1").await.unwrap();
            assert_eq!(saved.len(), 1);
            assert_eq!(saved[0].course_code, "ME F112");

            // Re-adding after removal is a fresh insert, not a duplicate.
            db.add_bookmark("user-1", "CS F111").await.unwrap();
        }

        #[tokio::test]
        async fn test_review_count_projection() {
            let db = create_test_db().await;
            db.insert_review("user-1", &test_review("CS F111"))
                .await
                .unwrap();
            db.insert_review("user-2", &test_review("CS F111"))
                .await
                .unwrap();
            db.insert_review("user-1", &test_review("ME F112"))
                .await
                .unwrap();

            let codes = db.review_course_codes().await.unwrap();
            assert_eq!(codes.len(), 3);
            assert_eq!(codes.iter().filter(|c| *c == "CS F111").count(), 2);
        }

        #[tokio::test]
        async fn test_session_lifecycle() {
            let db = create_test_db().await;
            let (user, token) = db.sign_in("f20230001@goa.bits-pilani.ac.in").await.unwrap();

            let current = db.session_user(&token).await.unwrap().unwrap();
            assert_eq!(current, user);

            // Signing in again reuses the user row under a new session.
            let (again, other_token) =
                db.sign_in("f20230001@goa.bits-pilani.ac.in").await.unwrap();
            assert_eq!(again.user_id, user.user_id);
            assert_ne!(other_token, token);

            db.sign_out(&token).await.unwrap();
            assert!(db.session_user(&token).await.unwrap().is_none());
            assert!(db.session_user(&other_token).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn test_expired_session_treated_as_absent() {
            let db = create_test_db().await;
            let (_, token) = db.sign_in("f20230001@goa.bits-pilani.ac.in").await.unwrap();

            let stale = (Utc::now() - Duration::days(SESSION_MAX_AGE_DAYS + 1))
                .to_rfc3339_opts(SecondsFormat::Micros, true);
            {
                let conn = db.conn.lock().await;
                conn.execute(
                    "UPDATE sessions SET created_at = ? WHERE token = ?",
                    [&stale, &token],
                )
                .unwrap();
            }

            assert!(db.session_user(&token).await.unwrap().is_none());
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
