use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One persisted SEO run per design, upserted on the `design_id` conflict
/// target.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "seo_analyses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub design_id: String,
    pub generated_title: Option<String>,
    pub generated_description: Option<String>,
    pub total_score: Option<f64>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::designs::Entity",
        from = "Column::DesignId",
        to = "super::designs::Column::Id"
    )]
    Designs,
    #[sea_orm(has_many = "super::seo_keywords::Entity")]
    SeoKeywords,
}

impl Related<super::designs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designs.def()
    }
}

impl Related<super::seo_keywords::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeoKeywords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
