use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::niches::Entity")]
    Niches,
    #[sea_orm(has_many = "super::designs::Entity")]
    Designs,
}

impl Related<super::niches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Niches.def()
    }
}

impl Related<super::designs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
