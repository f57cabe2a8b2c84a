use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use vitrine_auth_types::identity::BearerToken;
use vitrine_auth_types::token::TokenInfo;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::token::authenticate;

/// Caller identity from a valid, unrevoked bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub TokenInfo);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthServiceError::InvalidToken)?;
        let info = authenticate(&token, &state.jwt_secret, &state.revocation_store()).await?;
        Ok(Self(info))
    }
}
