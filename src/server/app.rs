use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use super::handlers::{designs, health, seo, taxonomy};
use crate::seo::SeoWorkflow;
use crate::storage::MockupStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Arc<dyn MockupStore>,
    pub workflow: Arc<dyn SeoWorkflow>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        taxonomy::list_themes,
        taxonomy::create_theme,
        taxonomy::update_theme,
        taxonomy::delete_theme,
        taxonomy::list_niches,
        taxonomy::create_niche,
        taxonomy::update_niche,
        taxonomy::delete_niche,
        taxonomy::list_sub_niches,
        taxonomy::create_sub_niche,
        taxonomy::update_sub_niche,
        taxonomy::delete_sub_niche,
        designs::list_designs,
        designs::get_design,
        designs::create_design,
        designs::update_design,
        designs::upload_mockup,
        designs::delete_mockup,
        seo::run_analysis,
        seo::run_write,
        seo::save_results,
        seo::load_existing,
    ),
    components(schemas(
        taxonomy::NameRequest,
        designs::DesignRequest,
        seo::WriteRequest,
        seo::SaveSeoRequest,
        seo::StoredAnalysisResponse,
        crate::services::design_service::DesignSummary,
        crate::services::design_service::DesignDetail,
        crate::seo::types::KeywordInsight,
        crate::seo::types::KeywordStatus,
        crate::seo::types::GeneratedCopy,
    ))
)]
pub struct ApiDoc;

pub async fn create_app(
    db: DatabaseConnection,
    store: Arc<dyn MockupStore>,
    workflow: Arc<dyn SeoWorkflow>,
    mockup_dir: Option<&Path>,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let state = AppState {
        db,
        store,
        workflow,
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let mut app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // OpenAPI document
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // API v1 routes
        .nest("/api/v1", api_v1_routes());

    // Serve mockup blobs where the public URLs point.
    if let Some(dir) = mockup_dir {
        app = app.nest_service("/mockups", ServeDir::new(dir));
    }

    Ok(app
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Theme routes
        .route("/themes", get(taxonomy::list_themes))
        .route("/themes", post(taxonomy::create_theme))
        .route("/themes/:id", put(taxonomy::update_theme))
        .route("/themes/:id", delete(taxonomy::delete_theme))
        // Niche routes
        .route("/themes/:id/niches", get(taxonomy::list_niches))
        .route("/themes/:id/niches", post(taxonomy::create_niche))
        .route("/niches/:id", put(taxonomy::update_niche))
        .route("/niches/:id", delete(taxonomy::delete_niche))
        // Sub-niche routes
        .route("/niches/:id/sub-niches", get(taxonomy::list_sub_niches))
        .route("/niches/:id/sub-niches", post(taxonomy::create_sub_niche))
        .route("/sub-niches/:id", put(taxonomy::update_sub_niche))
        .route("/sub-niches/:id", delete(taxonomy::delete_sub_niche))
        // Design routes
        .route("/designs", get(designs::list_designs))
        .route("/designs", post(designs::create_design))
        .route("/designs/:id", get(designs::get_design))
        .route("/designs/:id", put(designs::update_design))
        .route("/designs/:id/mockups", post(designs::upload_mockup))
        .route("/mockups/:id", delete(designs::delete_mockup))
        // SEO routes
        .route("/designs/:id/seo", get(seo::load_existing))
        .route("/designs/:id/seo", post(seo::save_results))
        .route("/designs/:id/seo/analyse", post(seo::run_analysis))
        .route("/designs/:id/seo/write", post(seo::run_write))
}
