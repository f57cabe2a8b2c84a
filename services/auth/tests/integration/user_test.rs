use vitrine_auth::error::AuthServiceError;
use vitrine_auth::usecase::user::{GetProfileUseCase, RegisterInput, RegisterUseCase};

use crate::helpers::{MockUserRepo, test_hasher, test_user};

fn registration(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        telephone: Some("+225 07 00 00 00".to_owned()),
        adresse: None,
        pays: Some("CI".to_owned()),
        profession: None,
    }
}

#[tokio::test]
async fn should_register_user_with_default_role() {
    let hasher = test_hasher();
    let users = MockUserRepo::empty().with_roles(&["user", "admin"]);
    let users_handle = users.users_handle();
    let memberships = users.memberships_handle();

    let uc = RegisterUseCase {
        users,
        hasher: hasher.clone(),
    };
    let output = uc
        .execute(registration("Awa Koné", "awa@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(output.name, "Awa Koné");
    assert_eq!(output.email, "awa@example.com");

    let stored = users_handle.lock().unwrap()[0].clone();
    assert_eq!(stored.id, output.id);
    assert!(stored.email_verified_at.is_none());
    assert!(hasher.verify("secret1", &stored.password_hash).await.unwrap());

    assert_eq!(
        memberships.lock().unwrap().as_slice(),
        &[(output.id, "user".to_owned())]
    );
}

#[tokio::test]
async fn should_register_without_role_when_default_missing() {
    let users = MockUserRepo::empty();
    let memberships = users.memberships_handle();
    let uc = RegisterUseCase {
        users,
        hasher: test_hasher(),
    };

    uc.execute(registration("Awa", "awa@example.com", "secret1"))
        .await
        .unwrap();
    assert!(memberships.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let hasher = test_hasher();
    let existing = test_user(&hasher).await;
    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![existing.clone()]),
        hasher,
    };

    let result = uc
        .execute(registration("Other", &existing.email, "secret1"))
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::EmailAlreadyRegistered)),
        "expected EmailAlreadyRegistered, got {result:?}"
    );
}

#[tokio::test]
async fn should_validate_registration_fields() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
        hasher: test_hasher(),
    };

    for input in [
        registration("   ", "awa@example.com", "secret1"),
        registration("Awa", "not-an-email", "secret1"),
        registration("Awa", "awa@example.com", "12345"),
    ] {
        let result = uc.execute(input).await;
        assert!(
            matches!(result, Err(AuthServiceError::ValidationFailed(_))),
            "expected ValidationFailed, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_return_profile_with_split_name_and_roles() {
    let hasher = test_hasher();
    let user = test_user(&hasher).await;
    let users = MockUserRepo::new(vec![user.clone()]);
    users
        .memberships
        .lock()
        .unwrap()
        .extend([(user.id, "user".to_owned()), (user.id, "admin".to_owned())]);

    let profile = GetProfileUseCase { users }.execute(user.id).await.unwrap();

    assert_eq!(profile.id, user.id);
    assert_eq!(profile.email, user.email);
    assert_eq!(profile.full_name, "Jean Paul Dupont");
    assert_eq!(profile.name.nom, "Dupont");
    assert_eq!(profile.name.prenoms, "Jean Paul");
    assert_eq!(profile.roles, vec!["admin".to_owned(), "user".to_owned()]);
}

#[tokio::test]
async fn should_return_user_not_found_for_deleted_account() {
    let result = GetProfileUseCase {
        users: MockUserRepo::empty(),
    }
    .execute(uuid::Uuid::now_v7())
    .await;
    assert!(matches!(result, Err(AuthServiceError::UserNotFound)));
}
