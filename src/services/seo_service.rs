use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::database::entities::{designs, seo_analyses, seo_keywords};
use crate::errors::StudioError;
use crate::seo::types::{KeywordInsight, KeywordStatus};

/// A persisted analysis joined with its keyword rows, reshaped back into
/// canonical records.
#[derive(Debug, Clone)]
pub struct StoredAnalysis {
    pub analysis: seo_analyses::Model,
    pub keywords: Vec<KeywordInsight>,
}

/// Persistence for SEO results: one analysis row per design (upserted on
/// the `design_id` conflict target) owning keyword rows that are replaced
/// wholesale on every save.
#[derive(Clone)]
pub struct SeoService {
    db: DatabaseConnection,
}

impl SeoService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upsert the analysis row, then delete-and-reinsert its keywords from
    /// the in-memory list. Both steps run in one transaction, so a failure
    /// leaves the previously persisted state untouched.
    pub async fn save_results(
        &self,
        design_id: &str,
        keywords: &[KeywordInsight],
        generated_title: Option<&str>,
        generated_description: Option<&str>,
    ) -> Result<seo_analyses::Model, StudioError> {
        designs::Entity::find_by_id(design_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("design", design_id))?;

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let analysis = seo_analyses::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            design_id: Set(design_id.to_string()),
            generated_title: Set(generated_title.map(str::to_string)),
            generated_description: Set(generated_description.map(str::to_string)),
            // Placeholder until an aggregate scoring pass exists.
            total_score: Set(Some(0.0)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        seo_analyses::Entity::insert(analysis)
            .on_conflict(
                OnConflict::column(seo_analyses::Column::DesignId)
                    .update_columns([
                        seo_analyses::Column::GeneratedTitle,
                        seo_analyses::Column::GeneratedDescription,
                        seo_analyses::Column::TotalScore,
                        seo_analyses::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&txn)
            .await?;

        let stored = find_by_design(&txn, design_id)
            .await?
            .ok_or_else(|| StudioError::not_found("seo analysis", design_id))?;

        seo_keywords::Entity::delete_many()
            .filter(seo_keywords::Column::AnalysisId.eq(stored.id.clone()))
            .exec(&txn)
            .await?;

        if !keywords.is_empty() {
            let rows: Vec<seo_keywords::ActiveModel> = keywords
                .iter()
                .map(|kw| seo_keywords::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    analysis_id: Set(stored.id.clone()),
                    keyword: Set(kw.keyword.clone()),
                    avg_volume: Set(Some(kw.avg_volume)),
                    competition: Set(Some(kw.competition)),
                    opportunity_score: Set(Some(kw.opportunity_score)),
                    volumes_history: Set(Some(
                        serde_json::to_string(&kw.volumes_history)
                            .unwrap_or_else(|_| "[]".to_string()),
                    )),
                    is_trending: Set(Some(kw.status.trending)),
                    is_evergreen: Set(Some(kw.status.evergreen)),
                    is_promising: Set(Some(kw.status.promising)),
                    created_at: Set(now),
                })
                .collect();

            seo_keywords::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(stored)
    }

    /// Fetch the persisted analysis for a design, if any, with its
    /// keywords reshaped into canonical records: stored flags back into
    /// the status triple, missing numerics to 0, missing history to empty.
    pub async fn load_existing(
        &self,
        design_id: &str,
    ) -> Result<Option<StoredAnalysis>, StudioError> {
        let Some(analysis) = find_by_design(&self.db, design_id).await? else {
            return Ok(None);
        };

        let keywords = seo_keywords::Entity::find()
            .filter(seo_keywords::Column::AnalysisId.eq(analysis.id.clone()))
            .order_by_asc(seo_keywords::Column::CreatedAt)
            .all(&self.db)
            .await?
            .iter()
            .map(insight_from_row)
            .collect();

        Ok(Some(StoredAnalysis { analysis, keywords }))
    }
}

async fn find_by_design(
    conn: &impl ConnectionTrait,
    design_id: &str,
) -> Result<Option<seo_analyses::Model>, StudioError> {
    let row = seo_analyses::Entity::find()
        .filter(seo_analyses::Column::DesignId.eq(design_id))
        .one(conn)
        .await?;
    Ok(row)
}

fn insight_from_row(row: &seo_keywords::Model) -> KeywordInsight {
    KeywordInsight {
        keyword: row.keyword.clone(),
        avg_volume: row.avg_volume.unwrap_or(0),
        competition: row.competition.unwrap_or(0.0),
        opportunity_score: row.opportunity_score.unwrap_or(0.0),
        volumes_history: row.volumes(),
        status: KeywordStatus {
            trending: row.is_trending.unwrap_or(false),
            evergreen: row.is_evergreen.unwrap_or(false),
            promising: row.is_promising.unwrap_or(false),
        },
    }
}
