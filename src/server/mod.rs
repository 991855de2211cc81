pub mod app;
pub mod handlers;

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use sea_orm_migration::prelude::*;
use tracing::info;

use crate::config::StudioConfig;
use crate::database::{connection::*, migrations::Migrator};
use crate::seo::HttpSeoWorkflow;
use crate::storage::FsMockupStore;

#[derive(Subcommand, Debug)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

pub async fn start_server(config: StudioConfig, cors_origin: Option<&str>) -> Result<()> {
    let database_url = get_database_url(Some(&config.database));
    let db = establish_connection(&database_url).await?;

    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    let store = Arc::new(FsMockupStore::new(
        &config.storage.root,
        &config.storage.public_base_url,
    ));
    let workflow = Arc::new(HttpSeoWorkflow::new(&config.workflow.webhook_url));

    let mockup_dir = std::path::PathBuf::from(&config.storage.root);
    let app = app::create_app(db, store, workflow, Some(&mockup_dir), cors_origin).await?;

    log_routes(config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes(port: u16) {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /api-docs/openapi.json      - OpenAPI document");
    info!("  /api/v1/*                   - REST API (taxonomy, designs, SEO)");
    info!("  /mockups/*                  - Mockup blobs");
    info!("Listening on port {}", port);
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}
