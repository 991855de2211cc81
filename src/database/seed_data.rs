use anyhow::Result;
use chrono::Utc;
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::database::entities::{designs, niches, sub_niches, themes};

/// Seed a small example taxonomy and one design so a fresh install has
/// something to browse. Safe to run repeatedly.
pub async fn create_example_catalog(db: &DatabaseConnection) -> Result<()> {
    let existing = themes::Entity::find()
        .filter(themes::Column::Name.eq("Philosophie"))
        .one(db)
        .await?;

    if existing.is_some() {
        info!("Example catalog already exists, skipping seed data creation");
        return Ok(());
    }

    info!("Creating example catalog");

    let theme = themes::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set("Philosophie".to_string()),
    }
    .insert(db)
    .await?;

    let niche = niches::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        theme_id: Set(theme.id.clone()),
        name: Set("Stoïcisme".to_string()),
    }
    .insert(db)
    .await?;

    let sub_niche = sub_niches::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        niche_id: Set(niche.id.clone()),
        name: Set("Citations antiques".to_string()),
    }
    .insert(db)
    .await?;

    let design = designs::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title: Set("L'obstacle est le chemin".to_string()),
        slogan: Set(Some("L'obstacle est le chemin.".to_string())),
        description: Set(Some(
            "Aphorisme stoïcien en typographie serif, fond sombre.".to_string(),
        )),
        theme_id: Set(Some(theme.id.clone())),
        niche_id: Set(Some(niche.id.clone())),
        sub_niche_id: Set(Some(sub_niche.id.clone())),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    info!("Created example design {}", design.id);
    Ok(())
}
