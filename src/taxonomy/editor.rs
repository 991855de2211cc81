use tracing::debug;

use super::cursor::{RefreshPlan, TaxonomyCursor, TaxonomyItem, TaxonomyLevel};
use crate::errors::StudioError;
use crate::services::taxonomy_service::TaxonomyService;

/// Interactive editor over the three taxonomy columns.
///
/// Wraps a [`TaxonomyCursor`] and the taxonomy CRUD service with the
/// editing policy of the management view: trimmed-name guards, a shared
/// `action_loading` flag refusing competing operations while one is in
/// flight, and a two-step delete (begin, then confirm). After each
/// successful mutation the owning level's list is refetched rather than
/// patched locally.
pub struct TaxonomyEditor {
    service: TaxonomyService,
    cursor: TaxonomyCursor,
    themes: Vec<TaxonomyItem>,
    action_loading: bool,
    pending_delete: Option<(TaxonomyLevel, String)>,
}

impl TaxonomyEditor {
    pub fn new(service: TaxonomyService) -> Self {
        Self {
            service,
            cursor: TaxonomyCursor::new(),
            themes: Vec::new(),
            action_loading: false,
            pending_delete: None,
        }
    }

    /// Initial load of the theme column.
    pub async fn load(&mut self) -> Result<(), StudioError> {
        self.refetch_level(TaxonomyLevel::Theme).await
    }

    pub fn themes(&self) -> &[TaxonomyItem] {
        &self.themes
    }

    pub fn cursor(&self) -> &TaxonomyCursor {
        &self.cursor
    }

    pub fn is_busy(&self) -> bool {
        self.action_loading
    }

    pub fn pending_delete(&self) -> Option<(TaxonomyLevel, &str)> {
        self.pending_delete
            .as_ref()
            .map(|(level, id)| (*level, id.as_str()))
    }

    pub async fn select_theme(&mut self, theme_id: Option<String>) -> Result<(), StudioError> {
        let plan = self.cursor.select_theme(theme_id);
        self.refresh(plan).await
    }

    pub async fn select_niche(&mut self, niche_id: Option<String>) -> Result<(), StudioError> {
        let plan = self.cursor.select_niche(niche_id);
        self.refresh(plan).await
    }

    /// Add an item at `level` under the current selection.
    pub async fn add(&mut self, level: TaxonomyLevel, name: &str) -> Result<(), StudioError> {
        let name = trimmed_name(name)?;
        self.begin_action()?;
        let result = self.do_add(level, &name).await;
        self.action_loading = false;
        result
    }

    /// Rename an existing item at `level`.
    pub async fn rename(
        &mut self,
        level: TaxonomyLevel,
        id: &str,
        name: &str,
    ) -> Result<(), StudioError> {
        let name = trimmed_name(name)?;
        self.begin_action()?;
        let result = self.do_rename(level, id, &name).await;
        self.action_loading = false;
        result
    }

    /// First step of a delete: remember the target. Nothing is removed
    /// until [`confirm_delete`](Self::confirm_delete).
    pub fn begin_delete(&mut self, level: TaxonomyLevel, id: impl Into<String>) {
        self.pending_delete = Some((level, id.into()));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of a delete: remove the pending target. Child rows go
    /// with it on the store side; if the target was the current selection
    /// the dependent levels are cleared per the cascade rules.
    pub async fn confirm_delete(&mut self) -> Result<(), StudioError> {
        let (level, id) = self
            .pending_delete
            .clone()
            .ok_or_else(|| StudioError::validation("no deletion pending"))?;
        self.begin_action()?;
        let result = self.do_delete(level, &id).await;
        self.action_loading = false;
        if result.is_ok() {
            self.pending_delete = None;
        }
        result
    }

    fn begin_action(&mut self) -> Result<(), StudioError> {
        if self.action_loading {
            return Err(StudioError::Busy);
        }
        self.action_loading = true;
        Ok(())
    }

    async fn do_add(&mut self, level: TaxonomyLevel, name: &str) -> Result<(), StudioError> {
        match level {
            TaxonomyLevel::Theme => {
                self.service.add_theme(name).await?;
            }
            TaxonomyLevel::Niche => {
                let theme_id = self
                    .cursor
                    .selected_theme()
                    .ok_or_else(|| StudioError::validation("no theme selected"))?
                    .to_string();
                self.service.add_niche(&theme_id, name).await?;
            }
            TaxonomyLevel::SubNiche => {
                let niche_id = self
                    .cursor
                    .selected_niche()
                    .ok_or_else(|| StudioError::validation("no niche selected"))?
                    .to_string();
                self.service.add_sub_niche(&niche_id, name).await?;
            }
        }
        self.refetch_level(level).await
    }

    async fn do_rename(
        &mut self,
        level: TaxonomyLevel,
        id: &str,
        name: &str,
    ) -> Result<(), StudioError> {
        match level {
            TaxonomyLevel::Theme => {
                self.service.rename_theme(id, name).await?;
            }
            TaxonomyLevel::Niche => {
                self.service.rename_niche(id, name).await?;
            }
            TaxonomyLevel::SubNiche => {
                self.service.rename_sub_niche(id, name).await?;
            }
        }
        self.refetch_level(level).await
    }

    async fn do_delete(&mut self, level: TaxonomyLevel, id: &str) -> Result<(), StudioError> {
        match level {
            TaxonomyLevel::Theme => self.service.delete_theme(id).await?,
            TaxonomyLevel::Niche => self.service.delete_niche(id).await?,
            TaxonomyLevel::SubNiche => self.service.delete_sub_niche(id).await?,
        }
        let plan = self.cursor.item_deleted(level, id);
        self.refresh(plan).await?;
        self.refetch_level(level).await
    }

    /// Perform the fetches a cursor transition asked for.
    async fn refresh(&mut self, plan: RefreshPlan) -> Result<(), StudioError> {
        if plan.niches {
            if let Some(theme_id) = self.cursor.selected_theme().map(str::to_string) {
                let items = to_items(
                    self.service
                        .list_niches(&theme_id)
                        .await?
                        .into_iter()
                        .map(|n| (n.id, n.name)),
                );
                if !self.cursor.apply_niches(&theme_id, items) {
                    debug!("Discarding stale niche list for theme {}", theme_id);
                }
            }
        }
        if plan.sub_niches {
            if let Some(niche_id) = self.cursor.selected_niche().map(str::to_string) {
                let items = to_items(
                    self.service
                        .list_sub_niches(&niche_id)
                        .await?
                        .into_iter()
                        .map(|s| (s.id, s.name)),
                );
                if !self.cursor.apply_sub_niches(&niche_id, items) {
                    debug!("Discarding stale sub-niche list for niche {}", niche_id);
                }
            }
        }
        Ok(())
    }

    /// Re-read the list owning `level` from the store.
    async fn refetch_level(&mut self, level: TaxonomyLevel) -> Result<(), StudioError> {
        match level {
            TaxonomyLevel::Theme => {
                self.themes = to_items(
                    self.service
                        .list_themes()
                        .await?
                        .into_iter()
                        .map(|t| (t.id, t.name)),
                );
                Ok(())
            }
            TaxonomyLevel::Niche => {
                self.refresh(RefreshPlan {
                    niches: true,
                    sub_niches: false,
                })
                .await
            }
            TaxonomyLevel::SubNiche => {
                self.refresh(RefreshPlan {
                    niches: false,
                    sub_niches: true,
                })
                .await
            }
        }
    }
}

fn to_items(rows: impl Iterator<Item = (String, String)>) -> Vec<TaxonomyItem> {
    rows.map(|(id, name)| TaxonomyItem { id, name }).collect()
}

fn trimmed_name(raw: &str) -> Result<String, StudioError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StudioError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}
