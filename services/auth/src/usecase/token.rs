use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use vitrine_auth_types::token::{JwtClaims, TokenInfo, sign_claims, validate_access_token};
use vitrine_domain::name::PersonName;

use crate::crypto::SecretHasher;
use crate::domain::repository::{LoginCodeRepository, TokenRevocationStore, UserRepository};
use crate::domain::types::AuthUser;
use crate::error::AuthServiceError;

fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Signs HS256 access tokens for verified users.
#[derive(Clone)]
pub struct TokenIssuer {
    pub secret: String,
    pub ttl_secs: u64,
}

impl TokenIssuer {
    /// Returns the signed token and its lifetime in seconds.
    pub fn issue(&self, user: &AuthUser) -> Result<(String, u64), AuthServiceError> {
        let name = PersonName::split(&user.name);
        let iat = now_secs();
        let claims = JwtClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            nom: name.nom,
            prenoms: name.prenoms,
            iat,
            exp: iat + self.ttl_secs,
            jti: Uuid::new_v4().to_string(),
        };
        let token = sign_claims(&claims, &self.secret).context("failed to sign access token")?;
        Ok((token, self.ttl_secs))
    }
}

/// Validate a bearer token and reject revoked ones.
pub async fn authenticate<R: TokenRevocationStore>(
    token: &str,
    secret: &str,
    revoked: &R,
) -> Result<TokenInfo, AuthServiceError> {
    let info = validate_access_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        AuthServiceError::InvalidToken
    })?;
    if revoked.is_revoked(&info.jti).await? {
        return Err(AuthServiceError::InvalidToken);
    }
    Ok(info)
}

// ── VerifyLoginCode ──────────────────────────────────────────────────────────

pub struct VerifyLoginCodeInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyLoginCodeOutput {
    pub user_id: Uuid,
    pub token: String,
    pub expires_in: u64,
}

pub struct VerifyLoginCodeUseCase<U: UserRepository, C: LoginCodeRepository> {
    pub users: U,
    pub login_codes: C,
    pub hasher: SecretHasher,
    pub issuer: TokenIssuer,
}

impl<U: UserRepository, C: LoginCodeRepository> VerifyLoginCodeUseCase<U, C> {
    pub async fn execute(
        &self,
        input: VerifyLoginCodeInput,
    ) -> Result<VerifyLoginCodeOutput, AuthServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        // Only the newest code counts; older ones were deleted at re-issue.
        let login_code = self
            .login_codes
            .find_latest(user.id)
            .await?
            .ok_or(AuthServiceError::NoCodeIssued)?;

        let now = Utc::now();
        if !login_code.is_active_at(now) {
            return Err(AuthServiceError::CodeExpired);
        }

        if !self
            .hasher
            .verify(&input.code, &login_code.code_hash)
            .await?
        {
            return Err(AuthServiceError::InvalidCode);
        }

        // Conditional update: a concurrent verifier that got here first wins.
        if !self.login_codes.consume(login_code.id, now).await? {
            return Err(AuthServiceError::CodeExpired);
        }

        // The code is already spent; a failed flag update must not cost the token.
        if user.email_verified_at.is_none() {
            if let Err(e) = self.users.mark_email_verified(user.id, now).await {
                tracing::warn!(error = ?e, user_id = %user.id, "failed to mark email verified");
            }
        }

        let (token, expires_in) = self.issuer.issue(&user)?;

        tracing::info!(
            user_id = %user.id,
            login_code_id = %login_code.id,
            "login code verified, token issued"
        );

        Ok(VerifyLoginCodeOutput {
            user_id: user.id,
            token,
            expires_in,
        })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<R: TokenRevocationStore> {
    pub revoked: R,
}

impl<R: TokenRevocationStore> LogoutUseCase<R> {
    /// Revoke the token until its natural expiry.
    pub async fn execute(&self, token: &TokenInfo) -> Result<(), AuthServiceError> {
        let remaining = token.exp.saturating_sub(now_secs()).max(1);
        self.revoked.revoke(&token.jti, remaining).await?;
        tracing::info!(user_id = %token.user_id, "access token revoked");
        Ok(())
    }
}
