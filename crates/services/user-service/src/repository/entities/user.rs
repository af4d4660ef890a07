//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub image: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub verified: bool,
    pub two_factor_enabled: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            full_name: model.full_name,
            image: model.image,
            email: model.email,
            password: model.password,
            verified: model.verified,
            two_factor_enabled: model.two_factor_enabled,
        }
    }
}
