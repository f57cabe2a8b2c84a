use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors produced by shared routing plumbing, outside any service handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("route not found")]
    NotFound,
    #[error("service unavailable")]
    Unavailable,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unavailable => "UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are already recorded by the trace layer; only 5xx carry a chain worth logging.
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::Unavailable => tracing::warn!(kind = "UNAVAILABLE", "service unavailable"),
            Self::NotFound => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Router fallback for unmatched paths. Apply with `.fallback(not_found)`.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
