use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, RedisError};

use crate::domain::repository::TokenRevocationStore;
use crate::error::AuthServiceError;

#[derive(Clone)]
pub struct RedisRevocationStore {
    pub pool: Pool,
}

fn revoked_key(jti: &str) -> String {
    format!("revoked_token:{jti}")
}

impl TokenRevocationStore for RedisRevocationStore {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(revoked_key(jti), 1u8, ttl_secs)
            .await
            .map_err(|e: RedisError| AuthServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let revoked: bool = conn
            .exists(revoked_key(jti))
            .await
            .map_err(|e: RedisError| AuthServiceError::Internal(e.into()))?;
        Ok(revoked)
    }
}
