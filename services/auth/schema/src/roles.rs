use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_user::Entity")]
    RoleUser,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_user::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_user::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
