use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

use crate::error::AppError;

/// Liveness probe for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe body: 200 when the database answers a ping, 503 otherwise.
///
/// Services wrap this in a handler that pulls the connection out of their state.
pub async fn database_ready(db: &DatabaseConnection) -> Result<StatusCode, AppError> {
    match db.ping().await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            Err(AppError::Unavailable)
        }
    }
}
