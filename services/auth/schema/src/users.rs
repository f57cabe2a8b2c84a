use sea_orm::entity::prelude::*;

/// Registered account. Credentials live here; the code flow only reads them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub pays: Option<String>,
    pub profession: Option<String>,
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::login_codes::Entity")]
    LoginCodes,
    #[sea_orm(has_many = "super::role_user::Entity")]
    RoleUser,
}

impl Related<super::login_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoginCodes.def()
    }
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_user::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_user::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
