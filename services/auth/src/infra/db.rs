use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use uuid::Uuid;

use vitrine_auth_schema::{login_codes, role_user, roles, users};
use vitrine_core::sea_ext::DbErrExt as _;

use crate::domain::repository::{LoginCodeRepository, RoleRepository, UserRepository};
use crate::domain::types::{AuthUser, LoginCode, NewUser, Role};
use crate::error::AuthServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<(), AuthServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            telephone: Set(user.telephone.clone()),
            adresse: Set(user.adresse.clone()),
            pays: Set(user.pays.clone()),
            profession: Set(user.profession.clone()),
            email_verified_at: Set(None),
            created_at: Set(user.created_at),
            updated_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_unique_violation() => Err(AuthServiceError::EmailAlreadyRegistered),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn assign_role(&self, user_id: Uuid, role_name: &str) -> Result<bool, AuthServiceError> {
        let Some(role) = roles::Entity::find()
            .filter(roles::Column::Name.eq(role_name))
            .one(&self.db)
            .await
            .context("find role by name")?
        else {
            return Ok(false);
        };

        role_user::Entity::insert(role_user::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
        })
        .on_conflict(
            OnConflict::columns([role_user::Column::UserId, role_user::Column::RoleId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("attach role to user")?;
        Ok(true)
    }

    async fn role_names(&self, user_id: Uuid) -> Result<Vec<String>, AuthServiceError> {
        let models = roles::Entity::find()
            .join(JoinType::InnerJoin, roles::Relation::RoleUser.def())
            .filter(role_user::Column::UserId.eq(user_id))
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await
            .context("list user roles")?;
        Ok(models.into_iter().map(|m| m.name).collect())
    }

    async fn mark_email_verified(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::EmailVerifiedAt, Expr::value(at))
            .col_expr(users::Column::UpdatedAt, Expr::value(at))
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::EmailVerifiedAt.is_null())
            .exec(&self.db)
            .await
            .context("mark email verified")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> AuthUser {
    AuthUser {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        email_verified_at: model.email_verified_at,
    }
}

// ── LoginCode repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLoginCodeRepository {
    pub db: DatabaseConnection,
}

impl LoginCodeRepository for DbLoginCodeRepository {
    async fn replace_active(&self, code: &LoginCode) -> Result<u64, AuthServiceError> {
        let deleted = self
            .db
            .transaction::<_, u64, DbErr>(|txn| {
                let code = code.clone();
                Box::pin(async move {
                    // Row lock on the owner serializes concurrent issuances.
                    users::Entity::find_by_id(code.user_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?;

                    let deleted = login_codes::Entity::delete_many()
                        .filter(login_codes::Column::UserId.eq(code.user_id))
                        .filter(login_codes::Column::ConsumedAt.is_null())
                        .exec(txn)
                        .await?
                        .rows_affected;

                    login_codes::ActiveModel {
                        id: Set(code.id),
                        user_id: Set(code.user_id),
                        code_hash: Set(code.code_hash),
                        expires_at: Set(code.expires_at),
                        consumed_at: Set(None),
                        created_at: Set(code.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(deleted)
                })
            })
            .await
            .context("replace active login code")?;
        Ok(deleted)
    }

    async fn find_latest(&self, user_id: Uuid) -> Result<Option<LoginCode>, AuthServiceError> {
        let model = login_codes::Entity::find()
            .filter(login_codes::Column::UserId.eq(user_id))
            .order_by_desc(login_codes::Column::CreatedAt)
            .order_by_desc(login_codes::Column::Id)
            .one(&self.db)
            .await
            .context("find latest login code")?;
        Ok(model.map(login_code_from_model))
    }

    async fn consume(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AuthServiceError> {
        let result = login_codes::Entity::update_many()
            .col_expr(login_codes::Column::ConsumedAt, Expr::value(at))
            .filter(login_codes::Column::Id.eq(id))
            .filter(login_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await
            .context("consume login code")?;
        Ok(result.rows_affected == 1)
    }
}

fn login_code_from_model(model: login_codes::Model) -> LoginCode {
    LoginCode {
        id: model.id,
        user_id: model.user_id,
        code_hash: model.code_hash,
        expires_at: model.expires_at,
        consumed_at: model.consumed_at,
        created_at: model.created_at,
    }
}

// ── Role repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn create(&self, role: &Role) -> Result<(), AuthServiceError> {
        let result = roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            description: Set(role.description.clone()),
            created_at: Set(role.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_unique_violation() => Err(AuthServiceError::RoleAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create role").into()),
        }
    }
}
