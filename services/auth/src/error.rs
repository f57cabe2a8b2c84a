use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
///
/// Messages are the client-facing `message` field of the JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Unknown email or wrong password. Both cases share this variant so the
    /// response does not reveal which accounts exist.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("No verification code found")]
    NoCodeIssued,
    /// Consumed or past expiry; the two are not distinguished.
    #[error("Verification code expired")]
    CodeExpired,
    #[error("Invalid verification code")]
    InvalidCode,
    #[error("Invalid token")]
    InvalidToken,
    #[error("{0}")]
    ValidationFailed(String),
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Role already exists")]
    RoleAlreadyExists,
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoCodeIssued => "NO_CODE_ISSUED",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::InvalidCode => "INVALID_CODE",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::RoleAlreadyExists => "ROLE_ALREADY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::NoCodeIssued
            | Self::CodeExpired
            | Self::InvalidCode
            | Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EmailAlreadyRegistered | Self::RoleAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The trace layer records every status; only Internal carries a chain worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Login-code delivery failed. Logged by the issuer, never returned to clients:
/// the persisted code stays valid.
#[derive(Debug, thiserror::Error)]
#[error("login code delivery failed: {0}")]
pub struct DeliveryFailure(pub String);
