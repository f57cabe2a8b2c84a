use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower::ServiceBuilder;

use vitrine_core::error::{AppError, not_found};
use vitrine_core::health::{database_ready, healthz};
use vitrine_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    auth::{login, logout, profile, register, verify_code},
    role::create_role,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Login code flow
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/verifycode", post(verify_code))
        // Bearer protected
        .route("/auth/profile", get(profile))
        .route("/auth/logout", post(logout))
        // Roles
        .route("/roles", post(create_role))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(trace_layer()),
        )
        .with_state(state)
}
