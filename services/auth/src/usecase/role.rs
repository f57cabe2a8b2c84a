use chrono::Utc;
use uuid::Uuid;

use vitrine_domain::role::validate_role_name;

use crate::domain::repository::RoleRepository;
use crate::domain::types::Role;
use crate::error::AuthServiceError;

pub struct CreateRoleInput {
    pub name: String,
    pub description: Option<String>,
}

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    pub async fn execute(&self, input: CreateRoleInput) -> Result<Role, AuthServiceError> {
        if !validate_role_name(&input.name) {
            return Err(AuthServiceError::ValidationFailed(
                "The role name is invalid".to_owned(),
            ));
        }

        let role = Role {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description.filter(|d| !d.trim().is_empty()),
            created_at: Utc::now(),
        };
        self.roles.create(&role).await?;

        tracing::info!(role_id = %role.id, name = %role.name, "role created");
        Ok(role)
    }
}
