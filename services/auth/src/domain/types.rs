use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Credential-store view of a user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub email_verified_at: Option<DateTime<Utc>>,
}

/// Account data written at registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub pays: Option<String>,
    pub profession: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One issuance of a login verification code.
#[derive(Debug, Clone)]
pub struct LoginCode {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Argon2 PHC string of the plaintext code.
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LoginCode {
    /// Unconsumed and not past expiry at `now`. The expiry instant itself
    /// still counts as active.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.consumed_at.is_none() && self.expires_at >= now
    }
}

#[derive(Debug, Clone)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Number of digits in a login code.
pub const LOGIN_CODE_DIGITS: usize = 6;

/// Exclusive upper bound of the numeric code space (10^6).
pub const LOGIN_CODE_SPACE: u32 = 1_000_000;

/// Login code time-to-live in seconds.
pub const LOGIN_CODE_TTL_SECS: i64 = 600;

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN_LEN: usize = 6;
