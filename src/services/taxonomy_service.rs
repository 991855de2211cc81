use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::database::entities::{niches, sub_niches, themes};
use crate::errors::StudioError;

/// Typed accessor for the three taxonomy tables. Lists are ordered by
/// name; add/rename guard against blank names; duplicate names are
/// permitted. Child rows disappear with their parent through the store's
/// foreign-key cascade.
#[derive(Clone)]
pub struct TaxonomyService {
    db: DatabaseConnection,
}

impl TaxonomyService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_themes(&self) -> Result<Vec<themes::Model>, StudioError> {
        let rows = themes::Entity::find()
            .order_by_asc(themes::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn add_theme(&self, name: &str) -> Result<themes::Model, StudioError> {
        let name = validated_name(name)?;
        let theme = themes::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
        }
        .insert(&self.db)
        .await?;
        Ok(theme)
    }

    pub async fn rename_theme(&self, id: &str, name: &str) -> Result<themes::Model, StudioError> {
        let name = validated_name(name)?;
        let theme = themes::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("theme", id))?;

        let mut theme: themes::ActiveModel = theme.into();
        theme.name = Set(name);
        Ok(theme.update(&self.db).await?)
    }

    pub async fn delete_theme(&self, id: &str) -> Result<(), StudioError> {
        let result = themes::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StudioError::not_found("theme", id));
        }
        Ok(())
    }

    pub async fn list_niches(&self, theme_id: &str) -> Result<Vec<niches::Model>, StudioError> {
        let rows = niches::Entity::find()
            .filter(niches::Column::ThemeId.eq(theme_id))
            .order_by_asc(niches::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn add_niche(
        &self,
        theme_id: &str,
        name: &str,
    ) -> Result<niches::Model, StudioError> {
        let name = validated_name(name)?;
        themes::Entity::find_by_id(theme_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("theme", theme_id))?;

        let niche = niches::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            theme_id: Set(theme_id.to_string()),
            name: Set(name),
        }
        .insert(&self.db)
        .await?;
        Ok(niche)
    }

    pub async fn rename_niche(&self, id: &str, name: &str) -> Result<niches::Model, StudioError> {
        let name = validated_name(name)?;
        let niche = niches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("niche", id))?;

        let mut niche: niches::ActiveModel = niche.into();
        niche.name = Set(name);
        Ok(niche.update(&self.db).await?)
    }

    pub async fn delete_niche(&self, id: &str) -> Result<(), StudioError> {
        let result = niches::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StudioError::not_found("niche", id));
        }
        Ok(())
    }

    pub async fn list_sub_niches(
        &self,
        niche_id: &str,
    ) -> Result<Vec<sub_niches::Model>, StudioError> {
        let rows = sub_niches::Entity::find()
            .filter(sub_niches::Column::NicheId.eq(niche_id))
            .order_by_asc(sub_niches::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn add_sub_niche(
        &self,
        niche_id: &str,
        name: &str,
    ) -> Result<sub_niches::Model, StudioError> {
        let name = validated_name(name)?;
        niches::Entity::find_by_id(niche_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("niche", niche_id))?;

        let sub_niche = sub_niches::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            niche_id: Set(niche_id.to_string()),
            name: Set(name),
        }
        .insert(&self.db)
        .await?;
        Ok(sub_niche)
    }

    pub async fn rename_sub_niche(
        &self,
        id: &str,
        name: &str,
    ) -> Result<sub_niches::Model, StudioError> {
        let name = validated_name(name)?;
        let sub_niche = sub_niches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StudioError::not_found("sub-niche", id))?;

        let mut sub_niche: sub_niches::ActiveModel = sub_niche.into();
        sub_niche.name = Set(name);
        Ok(sub_niche.update(&self.db).await?)
    }

    pub async fn delete_sub_niche(&self, id: &str) -> Result<(), StudioError> {
        let result = sub_niches::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StudioError::not_found("sub-niche", id));
        }
        Ok(())
    }
}

fn validated_name(raw: &str) -> Result<String, StudioError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StudioError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}
