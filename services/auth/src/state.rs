use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::crypto::SecretHasher;
use crate::infra::cache::RedisRevocationStore;
use crate::infra::db::{DbLoginCodeRepository, DbRoleRepository, DbUserRepository};
use crate::infra::mail::MailNotifier;
use crate::usecase::token::TokenIssuer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
    /// Echo the plaintext login code in the login response (non-production only).
    pub expose_login_code: bool,
    pub hasher: SecretHasher,
    pub notifier: MailNotifier,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn login_code_repo(&self) -> DbLoginCodeRepository {
        DbLoginCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn revocation_store(&self) -> RedisRevocationStore {
        RedisRevocationStore {
            pool: self.redis.clone(),
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer {
            secret: self.jwt_secret.clone(),
            ttl_secs: self.jwt_ttl_secs,
        }
    }
}
