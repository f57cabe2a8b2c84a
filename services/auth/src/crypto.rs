//! Slow salted hashing for passwords and login codes (Argon2id, PHC strings).
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use std::sync::Arc;

use anyhow::Context as _;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::AuthServiceError;

/// Secret compared against when the account does not exist, so an unknown
/// email costs as much as a wrong password.
const DUMMY_SECRET: &str = "vitrine-timing-equalizer";

#[derive(Clone)]
pub struct SecretHasher {
    argon2: Argon2<'static>,
    dummy_hash: Arc<str>,
}

impl SecretHasher {
    /// `m_cost` in KiB, `t_cost` in passes; single lane.
    pub fn with_cost(m_cost: u32, t_cost: u32) -> anyhow::Result<Self> {
        let params = Params::new(m_cost, t_cost, 1, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_blocking(&argon2, DUMMY_SECRET)?;
        Ok(Self {
            argon2,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub async fn hash(&self, secret: &str) -> Result<String, AuthServiceError> {
        let argon2 = self.argon2.clone();
        let secret = secret.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_blocking(&argon2, &secret))
            .await
            .context("hashing task failed")??;
        Ok(hash)
    }

    /// Check `secret` against a stored PHC string. An unparseable stored hash
    /// counts as a mismatch.
    pub async fn verify(&self, secret: &str, phc: &str) -> Result<bool, AuthServiceError> {
        let argon2 = self.argon2.clone();
        let secret = secret.to_owned();
        let phc = phc.to_owned();
        let matched = tokio::task::spawn_blocking(move || verify_blocking(&argon2, &secret, &phc))
            .await
            .context("verification task failed")??;
        Ok(matched)
    }

    /// Spend one verification worth of work without a real hash to compare to.
    pub async fn verify_dummy(&self, secret: &str) -> Result<(), AuthServiceError> {
        let dummy = self.dummy_hash.clone();
        self.verify(secret, &dummy).await.map(|_| ())
    }
}

fn hash_blocking(argon2: &Argon2<'_>, secret: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hash failed: {e}"))?;
    Ok(hash.to_string())
}

fn verify_blocking(argon2: &Argon2<'_>, secret: &str, phc: &str) -> anyhow::Result<bool> {
    let Ok(parsed) = PasswordHash::new(phc) else {
        tracing::warn!("stored hash is not a valid PHC string");
        return Ok(false);
    };
    match argon2.verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("argon2 verify failed: {e}")),
    }
}
