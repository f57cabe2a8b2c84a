#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{AuthUser, LoginCode, NewUser, Role};
use crate::error::{AuthServiceError, DeliveryFailure};

/// Credential store: user lookup, registration and role membership.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError>;

    /// Insert a new user. Fails with `EmailAlreadyRegistered` on a duplicate email.
    async fn create(&self, user: &NewUser) -> Result<(), AuthServiceError>;

    /// Attach the role named `role_name` to the user, keeping existing roles.
    /// Returns `false` if no such role exists.
    async fn assign_role(&self, user_id: Uuid, role_name: &str) -> Result<bool, AuthServiceError>;

    /// Names of the roles attached to the user, sorted.
    async fn role_names(&self, user_id: Uuid) -> Result<Vec<String>, AuthServiceError>;

    /// Set `email_verified_at` if it is still unset.
    async fn mark_email_verified(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;
}

/// Store for one-time login codes.
pub trait LoginCodeRepository: Send + Sync {
    /// Delete every unconsumed code of `code.user_id` and insert `code`, as one
    /// unit serialized per user. Returns the number of deleted codes.
    async fn replace_active(&self, code: &LoginCode) -> Result<u64, AuthServiceError>;

    /// Most recently created code of the user, consumed or not.
    async fn find_latest(&self, user_id: Uuid) -> Result<Option<LoginCode>, AuthServiceError>;

    /// Set `consumed_at = at` only if the code is still unconsumed.
    /// Returns `true` if this call consumed it.
    async fn consume(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AuthServiceError>;
}

pub trait RoleRepository: Send + Sync {
    /// Insert a role. Fails with `RoleAlreadyExists` on a duplicate name.
    async fn create(&self, role: &Role) -> Result<(), AuthServiceError>;
}

/// Out-of-band channel delivering login codes to users.
pub trait CodeNotifier: Send + Sync {
    async fn send_login_code(
        &self,
        email: &str,
        name: &str,
        code: &str,
    ) -> Result<(), DeliveryFailure>;
}

/// Revoked token ids, remembered until the token would have expired anyway.
pub trait TokenRevocationStore: Send + Sync {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), AuthServiceError>;
    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthServiceError>;
}
