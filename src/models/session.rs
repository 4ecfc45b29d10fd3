use serde::{Deserialize, Serialize};

/// The authenticated identity attached to a session cookie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
}

/// The institutional domain sign-in is restricted to, unless the server
/// overrides it through `ALLOWED_EMAIL_DOMAIN`.
pub const DEFAULT_EMAIL_DOMAIN: &str = "goa.bits-pilani.ac.in";

/// Sign-in is restricted to a single institutional domain.
pub fn email_allowed(email: &str, domain: &str) -> bool {
    let suffix = format!("@{}", domain);
    email.len() > suffix.len() && email.ends_with(&suffix)
}
