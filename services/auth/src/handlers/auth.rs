use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthServiceError;
use crate::handlers::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::login_code::{IssueLoginCodeInput, IssueLoginCodeUseCase};
use crate::usecase::token::{LogoutUseCase, VerifyLoginCodeInput, VerifyLoginCodeUseCase};
use crate::usecase::user::{GetProfileUseCase, RegisterInput, RegisterUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── POST /auth/register ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub pays: Option<String>,
    pub profession: Option<String>,
}

#[derive(Serialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: RegisteredUser,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        hasher: state.hasher.clone(),
    };
    let output = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            telephone: body.telephone,
            adresse: body.adresse,
            pays: body.pays,
            profession: body.profession,
        })
        .await?;

    let body = RegisterResponse {
        message: "User registered successfully",
        user: RegisteredUser {
            id: output.id,
            name: output.name,
            email: output.email,
        },
    };
    Ok((StatusCode::CREATED, Json(body)))
}

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthServiceError> {
    let usecase = IssueLoginCodeUseCase {
        users: state.user_repo(),
        login_codes: state.login_code_repo(),
        notifier: state.notifier.clone(),
        hasher: state.hasher.clone(),
    };
    let output = usecase
        .execute(IssueLoginCodeInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Verification code sent",
        code: state.expose_login_code.then_some(output.code),
    }))
}

// ── POST /auth/verifycode ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyCodeResponse {
    pub token: String,
    pub expires_in: u64,
}

pub async fn verify_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, AuthServiceError> {
    let usecase = VerifyLoginCodeUseCase {
        users: state.user_repo(),
        login_codes: state.login_code_repo(),
        hasher: state.hasher.clone(),
        issuer: state.token_issuer(),
    };
    let output = usecase
        .execute(VerifyLoginCodeInput {
            email: body.email,
            code: body.code,
        })
        .await?;

    Ok(Json(VerifyCodeResponse {
        token: output.token,
        expires_in: output.expires_in,
    }))
}

// ── GET /auth/profile ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenoms: String,
    pub full_name: String,
    pub roles: Vec<String>,
}

pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<ProfileResponse>, AuthServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let output = usecase.execute(identity.user_id).await?;

    Ok(Json(ProfileResponse {
        id: output.id,
        email: output.email,
        nom: output.name.nom,
        prenoms: output.name.prenoms,
        full_name: output.full_name,
        roles: output.roles,
    }))
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let usecase = LogoutUseCase {
        revoked: state.revocation_store(),
    };
    usecase.execute(&identity).await?;
    Ok(Json(MessageResponse {
        message: "Logged out successfully",
    }))
}
