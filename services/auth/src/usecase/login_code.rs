use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::crypto::SecretHasher;
use crate::domain::repository::{CodeNotifier, LoginCodeRepository, UserRepository};
use crate::domain::types::{LOGIN_CODE_DIGITS, LOGIN_CODE_SPACE, LOGIN_CODE_TTL_SECS, LoginCode};
use crate::error::AuthServiceError;

/// Uniform 6-digit code, zero padded.
fn generate_code() -> String {
    let mut rng = rand::rng();
    let n = rng.random_range(0..LOGIN_CODE_SPACE);
    format!("{n:0width$}", width = LOGIN_CODE_DIGITS)
}

pub struct IssueLoginCodeInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct IssueLoginCodeOutput {
    pub login_code_id: Uuid,
    /// Plaintext code. Only echoed to clients outside production.
    pub code: String,
}

pub struct IssueLoginCodeUseCase<U, C, N>
where
    U: UserRepository,
    C: LoginCodeRepository,
    N: CodeNotifier,
{
    pub users: U,
    pub login_codes: C,
    pub notifier: N,
    pub hasher: SecretHasher,
}

impl<U, C, N> IssueLoginCodeUseCase<U, C, N>
where
    U: UserRepository,
    C: LoginCodeRepository,
    N: CodeNotifier,
{
    pub async fn execute(
        &self,
        input: IssueLoginCodeInput,
    ) -> Result<IssueLoginCodeOutput, AuthServiceError> {
        // 1. Password check; unknown email and wrong password are indistinguishable
        let Some(user) = self.users.find_by_email(&input.email).await? else {
            self.hasher.verify_dummy(&input.password).await?;
            return Err(AuthServiceError::InvalidCredentials);
        };
        if !self
            .hasher
            .verify(&input.password, &user.password_hash)
            .await?
        {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // 2. Fresh code, hashed at rest
        let code = generate_code();
        let now = Utc::now();
        let login_code = LoginCode {
            id: Uuid::now_v7(),
            user_id: user.id,
            code_hash: self.hasher.hash(&code).await?,
            expires_at: now + Duration::seconds(LOGIN_CODE_TTL_SECS),
            consumed_at: None,
            created_at: now,
        };

        // 3. Drop prior unconsumed codes and persist the new one
        let replaced = self.login_codes.replace_active(&login_code).await?;

        // 4. Deliver; a failed send keeps the code usable
        if let Err(e) = self
            .notifier
            .send_login_code(&user.email, &user.name, &code)
            .await
        {
            tracing::warn!(
                error = %e,
                kind = "DELIVERY_FAILURE",
                user_id = %user.id,
                login_code_id = %login_code.id,
                "login code not delivered"
            );
        }

        tracing::info!(
            user_id = %user.id,
            login_code_id = %login_code.id,
            replaced,
            "login verification code generated"
        );

        Ok(IssueLoginCodeOutput {
            login_code_id: login_code.id,
            code,
        })
    }
}
