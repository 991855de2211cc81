use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sub_niches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub niche_id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::niches::Entity",
        from = "Column::NicheId",
        to = "super::niches::Column::Id"
    )]
    Niches,
}

impl Related<super::niches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Niches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
