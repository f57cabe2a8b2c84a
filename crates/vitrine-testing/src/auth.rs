//! Mock auth helpers for tests.
//!
//! `MockAuth` signs a real token with a test secret, so handlers and
//! extractors run their normal validation path.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use vitrine_auth_types::token::{JwtClaims, sign_claims};

/// Configurable identity signed into test tokens.
pub struct MockAuth {
    pub user_id: Uuid,
    pub email: String,
    pub jti: String,
    /// Lifetime of minted tokens in seconds. Negative values mint expired tokens.
    pub ttl_secs: i64,
}

impl MockAuth {
    pub fn new(user_id: Uuid, email: &str) -> Self {
        Self {
            user_id,
            email: email.to_owned(),
            jti: Uuid::new_v4().to_string(),
            ttl_secs: 3600,
        }
    }

    pub fn expired(mut self) -> Self {
        self.ttl_secs = -3600;
        self
    }

    pub fn claims(&self) -> JwtClaims {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        JwtClaims {
            sub: self.user_id.to_string(),
            email: self.email.clone(),
            nom: String::new(),
            prenoms: String::new(),
            iat: now,
            exp: now.saturating_add_signed(self.ttl_secs),
            jti: self.jti.clone(),
        }
    }

    /// Signed token for `secret`.
    pub fn token(&self, secret: &str) -> String {
        sign_claims(&self.claims(), secret).unwrap()
    }

    /// `Authorization: Bearer …` header map carrying a signed token.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap(),
        );
        map
    }
}
