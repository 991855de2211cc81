use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "designs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    /// Taxonomy links are optional and independently nullable. The editor
    /// keeps the triple consistent by construction; the schema does not.
    pub theme_id: Option<String>,
    pub niche_id: Option<String>,
    pub sub_niche_id: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id"
    )]
    Themes,
    #[sea_orm(
        belongs_to = "super::niches::Entity",
        from = "Column::NicheId",
        to = "super::niches::Column::Id"
    )]
    Niches,
    #[sea_orm(
        belongs_to = "super::sub_niches::Entity",
        from = "Column::SubNicheId",
        to = "super::sub_niches::Column::Id"
    )]
    SubNiches,
    #[sea_orm(has_many = "super::design_mockups::Entity")]
    DesignMockups,
    #[sea_orm(has_many = "super::seo_analyses::Entity")]
    SeoAnalyses,
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Themes.def()
    }
}

impl Related<super::niches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Niches.def()
    }
}

impl Related<super::sub_niches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubNiches.def()
    }
}

impl Related<super::design_mockups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DesignMockups.def()
    }
}

impl Related<super::seo_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeoAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
