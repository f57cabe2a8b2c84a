use chrono::Utc;
use email_address::EmailAddress;
use uuid::Uuid;

use vitrine_domain::name::PersonName;
use vitrine_domain::role::DEFAULT_ROLE_NAME;

use crate::crypto::SecretHasher;
use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, PASSWORD_MIN_LEN};
use crate::error::AuthServiceError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub pays: Option<String>,
    pub profession: Option<String>,
}

impl RegisterInput {
    fn validate(&self) -> Result<(), AuthServiceError> {
        if self.name.trim().is_empty() {
            return Err(AuthServiceError::ValidationFailed(
                "The name field is required".to_owned(),
            ));
        }
        if !EmailAddress::is_valid(&self.email) {
            return Err(AuthServiceError::ValidationFailed(
                "The email must be a valid email address".to_owned(),
            ));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AuthServiceError::ValidationFailed(format!(
                "The password must be at least {PASSWORD_MIN_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub hasher: SecretHasher,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AuthServiceError> {
        input.validate()?;

        let user = NewUser {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            email: input.email,
            password_hash: self.hasher.hash(&input.password).await?,
            telephone: input.telephone,
            adresse: input.adresse,
            pays: input.pays,
            profession: input.profession,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        if !self.users.assign_role(user.id, DEFAULT_ROLE_NAME).await? {
            tracing::warn!(
                user_id = %user.id,
                role = DEFAULT_ROLE_NAME,
                "default role missing, user registered without roles"
            );
        }

        tracing::info!(user_id = %user.id, "user registered");

        Ok(RegisterOutput {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ProfileOutput {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub name: PersonName,
    pub roles: Vec<String>,
}

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<ProfileOutput, AuthServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;
        let roles = self.users.role_names(user.id).await?;

        Ok(ProfileOutput {
            id: user.id,
            email: user.email,
            name: PersonName::split(&user.name),
            full_name: user.name,
            roles,
        })
    }
}
