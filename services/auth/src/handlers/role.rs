use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::role::{CreateRoleInput, CreateRoleUseCase};

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct RoleBody {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct CreateRoleResponse {
    pub message: &'static str,
    pub role: RoleBody,
}

pub async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = CreateRoleUseCase {
        roles: state.role_repo(),
    };
    let role = usecase
        .execute(CreateRoleInput {
            name: body.name,
            description: body.description,
        })
        .await?;

    let body = CreateRoleResponse {
        message: "Role created successfully",
        role: RoleBody {
            id: role.id,
            name: role.name,
            description: role.description,
            created_at: role.created_at,
        },
    };
    Ok((StatusCode::CREATED, Json(body)))
}
