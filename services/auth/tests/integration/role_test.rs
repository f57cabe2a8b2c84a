use vitrine_auth::error::AuthServiceError;
use vitrine_auth::usecase::role::{CreateRoleInput, CreateRoleUseCase};

use crate::helpers::MockRoleRepo;

fn role(name: &str, description: Option<&str>) -> CreateRoleInput {
    CreateRoleInput {
        name: name.to_owned(),
        description: description.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_create_role() {
    let repo = MockRoleRepo::default();
    let roles = repo.roles.clone();
    let uc = CreateRoleUseCase { roles: repo };

    let created = uc
        .execute(role("admin", Some("Full access")))
        .await
        .unwrap();

    assert_eq!(created.name, "admin");
    assert_eq!(created.description.as_deref(), Some("Full access"));
    assert_eq!(roles.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_drop_blank_description() {
    let uc = CreateRoleUseCase {
        roles: MockRoleRepo::default(),
    };
    let created = uc.execute(role("editor", Some("  "))).await.unwrap();
    assert!(created.description.is_none());
}

#[tokio::test]
async fn should_reject_duplicate_role() {
    let uc = CreateRoleUseCase {
        roles: MockRoleRepo::default(),
    };
    uc.execute(role("user", None)).await.unwrap();

    let result = uc.execute(role("user", None)).await;
    assert!(
        matches!(result, Err(AuthServiceError::RoleAlreadyExists)),
        "expected RoleAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_invalid_role_name() {
    let uc = CreateRoleUseCase {
        roles: MockRoleRepo::default(),
    };
    for name in ["", "   ", " padded"] {
        let result = uc.execute(role(name, None)).await;
        assert!(
            matches!(result, Err(AuthServiceError::ValidationFailed(_))),
            "expected ValidationFailed for {name:?}, got {result:?}"
        );
    }
}
