//! `Authorization: Bearer` extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderMap, StatusCode};

/// Raw bearer token taken from the `Authorization` header.
///
/// Returns 401 if the header is absent, not valid ASCII, uses another scheme,
/// or carries an empty token. Signature checks happen in the caller, which
/// knows the signing secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Parse the bearer token out of a header map. The scheme is matched
    /// case-insensitively.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.to_owned()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Header parsing is synchronous; returning a 'static async block keeps the
    // future free of the `parts` borrow.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = Self::from_headers(&parts.headers);
        async move { token.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
