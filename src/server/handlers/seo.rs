use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error_status;
use crate::database::entities::seo_analyses;
use crate::seo::{
    decode_keyword_results, decode_write_output, GeneratedCopy, KeywordInsight, SeoRequest,
};
use crate::server::app::AppState;
use crate::services::design_service::{DesignDetail, DesignService};
use crate::services::SeoService;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct WriteRequest {
    pub keywords: Vec<KeywordInsight>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SaveSeoRequest {
    pub keywords: Vec<KeywordInsight>,
    pub generated_title: Option<String>,
    pub generated_description: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StoredAnalysisResponse {
    pub analysis: seo_analyses::Model,
    pub keywords: Vec<KeywordInsight>,
}

async fn design_detail(state: &AppState, id: &str) -> Result<DesignDetail, StatusCode> {
    DesignService::new(state.db.clone(), state.store.clone())
        .detail(id)
        .await
        .map_err(error_status)?
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    post,
    path = "/api/v1/designs/{id}/seo/analyse",
    params(("id" = String, Path, description = "Design ID")),
    responses(
        (status = 200, description = "Normalized keyword results", body = [crate::seo::types::KeywordInsight]),
        (status = 404, description = "Design not found"),
        (status = 502, description = "Workflow answered with an error status")
    )
)]
pub async fn run_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<KeywordInsight>>, StatusCode> {
    let detail = design_detail(&state, &id).await?;
    let body = state
        .workflow
        .dispatch(&SeoRequest::analyse(&detail.brief()))
        .await
        .map_err(error_status)?;
    Ok(Json(decode_keyword_results(&body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/designs/{id}/seo/write",
    params(("id" = String, Path, description = "Design ID")),
    request_body = WriteRequest,
    responses(
        (status = 200, description = "Generated listing copy", body = crate::seo::types::GeneratedCopy),
        (status = 404, description = "Design not found"),
        (status = 502, description = "Workflow answered with an error status")
    )
)]
pub async fn run_write(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<WriteRequest>,
) -> Result<Json<GeneratedCopy>, StatusCode> {
    let detail = design_detail(&state, &id).await?;
    let body = state
        .workflow
        .dispatch(&SeoRequest::write(&detail.brief(), payload.keywords))
        .await
        .map_err(error_status)?;
    Ok(Json(decode_write_output(&body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/designs/{id}/seo",
    params(("id" = String, Path, description = "Design ID")),
    request_body = SaveSeoRequest,
    responses(
        (status = 200, description = "Analysis upserted, keywords replaced", body = crate::database::entities::seo_analyses::Model),
        (status = 404, description = "Design not found")
    )
)]
pub async fn save_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveSeoRequest>,
) -> Result<Json<seo_analyses::Model>, StatusCode> {
    let analysis = SeoService::new(state.db.clone())
        .save_results(
            &id,
            &payload.keywords,
            payload.generated_title.as_deref(),
            payload.generated_description.as_deref(),
        )
        .await
        .map_err(error_status)?;
    Ok(Json(analysis))
}

#[utoipa::path(
    get,
    path = "/api/v1/designs/{id}/seo",
    params(("id" = String, Path, description = "Design ID")),
    responses(
        (status = 200, description = "Previously persisted analysis with keywords", body = StoredAnalysisResponse),
        (status = 404, description = "No analysis persisted for this design")
    )
)]
pub async fn load_existing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredAnalysisResponse>, StatusCode> {
    let stored = SeoService::new(state.db.clone())
        .load_existing(&id)
        .await
        .map_err(error_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(StoredAnalysisResponse {
        analysis: stored.analysis,
        keywords: stored.keywords,
    }))
}
