use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "design_mockups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub design_id: String,
    /// Public URL of the stored blob.
    pub storage_url: String,
    pub is_primary: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::designs::Entity",
        from = "Column::DesignId",
        to = "super::designs::Column::Id"
    )]
    Designs,
}

impl Related<super::designs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
