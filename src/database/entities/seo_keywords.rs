use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "seo_keywords")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub analysis_id: String,
    pub keyword: String,
    pub avg_volume: Option<i64>,
    pub competition: Option<f64>,
    pub opportunity_score: Option<f64>,
    /// JSON array of monthly search volumes.
    pub volumes_history: Option<String>,
    pub is_trending: Option<bool>,
    pub is_evergreen: Option<bool>,
    pub is_promising: Option<bool>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seo_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::seo_analyses::Column::Id"
    )]
    SeoAnalyses,
}

impl Related<super::seo_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeoAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parse the stored volume series, treating a missing or malformed
    /// column as an empty history.
    pub fn volumes(&self) -> Vec<i64> {
        self.volumes_history
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    pub fn set_volumes(&mut self, volumes: &[i64]) -> Result<(), serde_json::Error> {
        self.volumes_history = Some(serde_json::to_string(volumes)?);
        Ok(())
    }
}
