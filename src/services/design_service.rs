use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::database::entities::{design_mockups, designs, niches, sub_niches, themes};
use crate::errors::StudioError;
use crate::seo::DesignBrief;
use crate::storage::{mockup_path, MockupStore};

/// Form contents for creating or updating a design. `id` set means update.
/// Unset taxonomy links are stored as NULL.
#[derive(Debug, Clone, Default)]
pub struct DesignDraft {
    pub id: Option<String>,
    pub title: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub theme_id: Option<String>,
    pub niche_id: Option<String>,
    pub sub_niche_id: Option<String>,
    pub images: Vec<NewMockupImage>,
}

/// A locally attached image file awaiting upload.
#[derive(Debug, Clone)]
pub struct NewMockupImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Card data for the catalog listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DesignSummary {
    pub design: designs::Model,
    pub theme_name: Option<String>,
    pub niche_name: Option<String>,
    /// First entry doubles as the card thumbnail.
    pub mockup_urls: Vec<String>,
}

/// A design joined with its taxonomy names and mockups, as the SEO view
/// consumes it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DesignDetail {
    pub design: designs::Model,
    pub theme_name: Option<String>,
    pub niche_name: Option<String>,
    pub sub_niche_name: Option<String>,
    pub mockups: Vec<design_mockups::Model>,
}

impl DesignDetail {
    /// Attributes the SEO workflow payload is built from.
    pub fn brief(&self) -> DesignBrief {
        DesignBrief {
            slogan: self.design.slogan.clone(),
            description: self.design.description.clone(),
            theme: self.theme_name.clone(),
            niche: self.niche_name.clone(),
            sub_niche: self.sub_niche_name.clone(),
            mockup_urls: self
                .mockups
                .iter()
                .map(|m| m.storage_url.clone())
                .collect(),
        }
    }
}

/// Design rows plus their mockup blobs.
#[derive(Clone)]
pub struct DesignService {
    db: DatabaseConnection,
    store: Arc<dyn MockupStore>,
}

impl DesignService {
    pub fn new(db: DatabaseConnection, store: Arc<dyn MockupStore>) -> Self {
        Self { db, store }
    }

    /// Commit the design row, then upload any newly attached images
    /// sequentially. An individual upload failure is logged and skipped;
    /// the save still succeeds for the rest.
    pub async fn save(&self, draft: DesignDraft) -> Result<designs::Model, StudioError> {
        if draft.title.trim().is_empty() {
            return Err(StudioError::validation("title must not be empty"));
        }

        let design = match &draft.id {
            Some(id) => {
                let existing = designs::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or_else(|| StudioError::not_found("design", id))?;

                let mut design: designs::ActiveModel = existing.into();
                design.title = Set(draft.title.trim().to_string());
                design.slogan = Set(draft.slogan.clone());
                design.description = Set(draft.description.clone());
                design.theme_id = Set(draft.theme_id.clone());
                design.niche_id = Set(draft.niche_id.clone());
                design.sub_niche_id = Set(draft.sub_niche_id.clone());
                design.update(&self.db).await?
            }
            None => {
                designs::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    title: Set(draft.title.trim().to_string()),
                    slogan: Set(draft.slogan.clone()),
                    description: Set(draft.description.clone()),
                    theme_id: Set(draft.theme_id.clone()),
                    niche_id: Set(draft.niche_id.clone()),
                    sub_niche_id: Set(draft.sub_niche_id.clone()),
                    created_at: Set(Utc::now()),
                }
                .insert(&self.db)
                .await?
            }
        };

        self.attach_mockups(&design.id, draft.images).await?;
        Ok(design)
    }

    /// Upload images one after the other and insert a mockup row per
    /// success. Failures are per-file: logged, skipped, and invisible in
    /// the return value beyond the missing row.
    pub async fn attach_mockups(
        &self,
        design_id: &str,
        images: Vec<NewMockupImage>,
    ) -> Result<Vec<design_mockups::Model>, StudioError> {
        designs::Entity::find_by_id(design_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("design", design_id))?;

        let mut attached = Vec::new();
        for image in images {
            let path = mockup_path(design_id, &image.filename);
            if let Err(err) = self.store.upload(&path, &image.bytes).await {
                warn!("Skipping mockup upload {}: {}", image.filename, err);
                continue;
            }

            let row = design_mockups::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                design_id: Set(design_id.to_string()),
                storage_url: Set(self.store.public_url(&path)),
                // Primary-flag logic is not implemented; listings use the
                // first-fetched mockup as the thumbnail.
                is_primary: Set(false),
            }
            .insert(&self.db)
            .await;

            match row {
                Ok(row) => attached.push(row),
                Err(err) => warn!("Skipping mockup row for {}: {}", image.filename, err),
            }
        }
        Ok(attached)
    }

    pub async fn mockups(
        &self,
        design_id: &str,
    ) -> Result<Vec<design_mockups::Model>, StudioError> {
        let rows = design_mockups::Entity::find()
            .filter(design_mockups::Column::DesignId.eq(design_id))
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Delete the mockup row, then best-effort delete its blob. A storage
    /// failure after the row is gone leaves an orphaned blob; it is logged
    /// and accepted.
    pub async fn delete_mockup(&self, id: &str) -> Result<(), StudioError> {
        let mockup = design_mockups::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("mockup", id))?;

        design_mockups::Entity::delete_by_id(id).exec(&self.db).await?;

        match self.store.path_from_url(&mockup.storage_url) {
            Some(path) => {
                if let Err(err) = self.store.delete(&path).await {
                    warn!("Could not delete mockup blob {}: {}", path, err);
                }
            }
            None => warn!(
                "Mockup {} has an unrecognized storage url: {}",
                id, mockup.storage_url
            ),
        }
        Ok(())
    }

    /// Catalog listing: newest first, joined with taxonomy names and
    /// mockup URLs, optionally filtered by a case-insensitive search over
    /// title and slogan.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<DesignSummary>, StudioError> {
        let mut query = designs::Entity::find().order_by_desc(designs::Column::CreatedAt);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(designs::Column::Title.contains(term))
                    .add(designs::Column::Slogan.contains(term)),
            );
        }
        let rows = query.all(&self.db).await?;

        let ids: Vec<String> = rows.iter().map(|d| d.id.clone()).collect();
        let mut mockups_by_design: HashMap<String, Vec<String>> = HashMap::new();
        if !ids.is_empty() {
            let mockups = design_mockups::Entity::find()
                .filter(design_mockups::Column::DesignId.is_in(ids))
                .all(&self.db)
                .await?;
            for mockup in mockups {
                mockups_by_design
                    .entry(mockup.design_id)
                    .or_default()
                    .push(mockup.storage_url);
            }
        }

        let theme_names = name_map(themes::Entity::find().all(&self.db).await?, |t| {
            (t.id, t.name)
        });
        let niche_names = name_map(niches::Entity::find().all(&self.db).await?, |n| {
            (n.id, n.name)
        });

        Ok(rows
            .into_iter()
            .map(|design| DesignSummary {
                theme_name: design
                    .theme_id
                    .as_ref()
                    .and_then(|id| theme_names.get(id).cloned()),
                niche_name: design
                    .niche_id
                    .as_ref()
                    .and_then(|id| niche_names.get(id).cloned()),
                mockup_urls: mockups_by_design.remove(&design.id).unwrap_or_default(),
                design,
            })
            .collect())
    }

    pub async fn detail(&self, id: &str) -> Result<Option<DesignDetail>, StudioError> {
        let Some(design) = designs::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let theme_name = match &design.theme_id {
            Some(theme_id) => themes::Entity::find_by_id(theme_id)
                .one(&self.db)
                .await?
                .map(|t| t.name),
            None => None,
        };
        let niche_name = match &design.niche_id {
            Some(niche_id) => niches::Entity::find_by_id(niche_id)
                .one(&self.db)
                .await?
                .map(|n| n.name),
            None => None,
        };
        let sub_niche_name = match &design.sub_niche_id {
            Some(sub_niche_id) => sub_niches::Entity::find_by_id(sub_niche_id)
                .one(&self.db)
                .await?
                .map(|s| s.name),
            None => None,
        };
        let mockups = self.mockups(&design.id).await?;

        Ok(Some(DesignDetail {
            design,
            theme_name,
            niche_name,
            sub_niche_name,
            mockups,
        }))
    }
}

fn name_map<M>(rows: Vec<M>, split: impl Fn(M) -> (String, String)) -> HashMap<String, String> {
    rows.into_iter().map(split).collect()
}

/// Per-design editing session over the mockup list. Removal is optimistic:
/// the local list drops the mockup immediately and is re-derived from a
/// fresh read when the remote delete fails, rather than inverting the
/// local change.
pub struct DesignWorkspace {
    design_id: String,
    mockups: Vec<design_mockups::Model>,
}

impl DesignWorkspace {
    pub async fn open(service: &DesignService, design_id: &str) -> Result<Self, StudioError> {
        designs::Entity::find_by_id(design_id)
            .one(&service.db)
            .await?
            .ok_or_else(|| StudioError::not_found("design", design_id))?;

        Ok(Self {
            design_id: design_id.to_string(),
            mockups: service.mockups(design_id).await?,
        })
    }

    pub fn design_id(&self) -> &str {
        &self.design_id
    }

    pub fn mockups(&self) -> &[design_mockups::Model] {
        &self.mockups
    }

    pub async fn refresh(&mut self, service: &DesignService) -> Result<(), StudioError> {
        self.mockups = service.mockups(&self.design_id).await?;
        Ok(())
    }

    pub async fn remove_mockup(
        &mut self,
        service: &DesignService,
        mockup_id: &str,
    ) -> Result<(), StudioError> {
        self.mockups.retain(|m| m.id != mockup_id);

        match service.delete_mockup(mockup_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.refresh(service).await?;
                Err(err)
            }
        }
    }
}
