use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use argon2::Params;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use vitrine_auth::crypto::SecretHasher;
use vitrine_auth::domain::repository::{
    CodeNotifier, LoginCodeRepository, RoleRepository, TokenRevocationStore, UserRepository,
};
use vitrine_auth::domain::types::{AuthUser, LoginCode, NewUser, Role};
use vitrine_auth::error::{AuthServiceError, DeliveryFailure};
use vitrine_auth::usecase::token::TokenIssuer;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "s3cret-pass";

/// Cheapest valid Argon2 parameters; tests only need correctness.
pub fn test_hasher() -> SecretHasher {
    SecretHasher::with_cost(Params::MIN_M_COST, 1).unwrap()
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer {
        secret: TEST_SECRET.to_owned(),
        ttl_secs: 3600,
    }
}

pub async fn test_user(hasher: &SecretHasher) -> AuthUser {
    AuthUser {
        id: Uuid::now_v7(),
        name: "Jean Paul Dupont".to_owned(),
        email: "jean@example.com".to_owned(),
        password_hash: hasher.hash(TEST_PASSWORD).await.unwrap(),
        email_verified_at: None,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<AuthUser>>>,
    /// Names of the roles that exist.
    pub roles: Vec<String>,
    /// (user_id, role_name) memberships.
    pub memberships: Arc<Mutex<Vec<(Uuid, String)>>>,
    /// Make `mark_email_verified` fail, as a dropped connection would.
    pub fail_mark_verified: bool,
}

impl MockUserRepo {
    pub fn new(users: Vec<AuthUser>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            roles: vec![],
            memberships: Arc::new(Mutex::new(vec![])),
            fail_mark_verified: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| (*r).to_owned()).collect();
        self
    }

    pub fn failing_mark_verified(mut self) -> Self {
        self.fail_mark_verified = true;
        self
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<AuthUser>>> {
        Arc::clone(&self.users)
    }

    pub fn memberships_handle(&self) -> Arc<Mutex<Vec<(Uuid, String)>>> {
        Arc::clone(&self.memberships)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthServiceError::EmailAlreadyRegistered);
        }
        users.push(AuthUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            email_verified_at: None,
        });
        Ok(())
    }

    async fn assign_role(&self, user_id: Uuid, role_name: &str) -> Result<bool, AuthServiceError> {
        if !self.roles.iter().any(|r| r == role_name) {
            return Ok(false);
        }
        let mut memberships = self.memberships.lock().unwrap();
        if !memberships
            .iter()
            .any(|(id, name)| *id == user_id && name == role_name)
        {
            memberships.push((user_id, role_name.to_owned()));
        }
        Ok(true)
    }

    async fn role_names(&self, user_id: Uuid) -> Result<Vec<String>, AuthServiceError> {
        let mut names: Vec<String> = self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn mark_email_verified(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        if self.fail_mark_verified {
            return Err(anyhow::anyhow!("connection reset").into());
        }
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users
            .iter_mut()
            .find(|u| u.id == user_id && u.email_verified_at.is_none())
        {
            u.email_verified_at = Some(at);
        }
        Ok(())
    }
}

// ── MockLoginCodeRepo ────────────────────────────────────────────────────────

pub struct MockLoginCodeRepo {
    pub codes: Arc<Mutex<Vec<LoginCode>>>,
}

impl MockLoginCodeRepo {
    pub fn new(codes: Vec<LoginCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal code list for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<Vec<LoginCode>>> {
        Arc::clone(&self.codes)
    }
}

impl LoginCodeRepository for MockLoginCodeRepo {
    async fn replace_active(&self, code: &LoginCode) -> Result<u64, AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.user_id != code.user_id || c.consumed_at.is_some());
        let deleted = (before - codes.len()) as u64;
        codes.push(code.clone());
        Ok(deleted)
    }

    async fn find_latest(&self, user_id: Uuid) -> Result<Option<LoginCode>, AuthServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .max_by_key(|c| (c.created_at, c.id))
            .cloned())
    }

    async fn consume(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        match codes
            .iter_mut()
            .find(|c| c.id == id && c.consumed_at.is_none())
        {
            Some(c) => {
                c.consumed_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

/// Records (email, code) pairs; optionally fails every send.
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl CodeNotifier for MockNotifier {
    async fn send_login_code(
        &self,
        email: &str,
        _name: &str,
        code: &str,
    ) -> Result<(), DeliveryFailure> {
        if self.fail {
            return Err(DeliveryFailure("smtp unreachable".to_owned()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── MockRevocationStore ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRevocationStore {
    pub revoked: Arc<Mutex<HashSet<String>>>,
}

impl TokenRevocationStore for MockRevocationStore {
    async fn revoke(&self, jti: &str, _ttl_secs: u64) -> Result<(), AuthServiceError> {
        self.revoked.lock().unwrap().insert(jti.to_owned());
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthServiceError> {
        Ok(self.revoked.lock().unwrap().contains(jti))
    }
}

// ── MockRoleRepo ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRoleRepo {
    pub roles: Arc<Mutex<Vec<Role>>>,
}

impl RoleRepository for MockRoleRepo {
    async fn create(&self, role: &Role) -> Result<(), AuthServiceError> {
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == role.name) {
            return Err(AuthServiceError::RoleAlreadyExists);
        }
        roles.push(role.clone());
        Ok(())
    }
}
