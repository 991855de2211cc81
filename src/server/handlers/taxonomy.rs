use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error_status;
use crate::database::entities::{niches, sub_niches, themes};
use crate::server::app::AppState;
use crate::services::TaxonomyService;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct NameRequest {
    pub name: String,
}

fn service(state: &AppState) -> TaxonomyService {
    TaxonomyService::new(state.db.clone())
}

#[utoipa::path(
    get,
    path = "/api/v1/themes",
    responses(
        (status = 200, description = "List all themes, ordered by name", body = [crate::database::entities::themes::Model])
    )
)]
pub async fn list_themes(
    State(state): State<AppState>,
) -> Result<Json<Vec<themes::Model>>, StatusCode> {
    let themes = service(&state).list_themes().await.map_err(error_status)?;
    Ok(Json(themes))
}

#[utoipa::path(
    post,
    path = "/api/v1/themes",
    request_body = NameRequest,
    responses(
        (status = 200, description = "Theme created", body = crate::database::entities::themes::Model),
        (status = 400, description = "Blank name")
    )
)]
pub async fn create_theme(
    State(state): State<AppState>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<themes::Model>, StatusCode> {
    let theme = service(&state)
        .add_theme(&payload.name)
        .await
        .map_err(error_status)?;
    Ok(Json(theme))
}

#[utoipa::path(
    put,
    path = "/api/v1/themes/{id}",
    params(("id" = String, Path, description = "Theme ID")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Theme renamed", body = crate::database::entities::themes::Model),
        (status = 404, description = "Theme not found")
    )
)]
pub async fn update_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<themes::Model>, StatusCode> {
    let theme = service(&state)
        .rename_theme(&id, &payload.name)
        .await
        .map_err(error_status)?;
    Ok(Json(theme))
}

#[utoipa::path(
    delete,
    path = "/api/v1/themes/{id}",
    params(("id" = String, Path, description = "Theme ID")),
    responses(
        (status = 204, description = "Theme and its child rows deleted"),
        (status = 404, description = "Theme not found")
    )
)]
pub async fn delete_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    service(&state).delete_theme(&id).await.map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/themes/{id}/niches",
    params(("id" = String, Path, description = "Theme ID")),
    responses(
        (status = 200, description = "Niches of the theme, ordered by name", body = [crate::database::entities::niches::Model])
    )
)]
pub async fn list_niches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<niches::Model>>, StatusCode> {
    let niches = service(&state)
        .list_niches(&id)
        .await
        .map_err(error_status)?;
    Ok(Json(niches))
}

#[utoipa::path(
    post,
    path = "/api/v1/themes/{id}/niches",
    params(("id" = String, Path, description = "Theme ID")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Niche created", body = crate::database::entities::niches::Model),
        (status = 404, description = "Theme not found")
    )
)]
pub async fn create_niche(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<niches::Model>, StatusCode> {
    let niche = service(&state)
        .add_niche(&id, &payload.name)
        .await
        .map_err(error_status)?;
    Ok(Json(niche))
}

#[utoipa::path(
    put,
    path = "/api/v1/niches/{id}",
    params(("id" = String, Path, description = "Niche ID")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Niche renamed", body = crate::database::entities::niches::Model),
        (status = 404, description = "Niche not found")
    )
)]
pub async fn update_niche(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<niches::Model>, StatusCode> {
    let niche = service(&state)
        .rename_niche(&id, &payload.name)
        .await
        .map_err(error_status)?;
    Ok(Json(niche))
}

#[utoipa::path(
    delete,
    path = "/api/v1/niches/{id}",
    params(("id" = String, Path, description = "Niche ID")),
    responses(
        (status = 204, description = "Niche and its sub-niches deleted"),
        (status = 404, description = "Niche not found")
    )
)]
pub async fn delete_niche(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    service(&state).delete_niche(&id).await.map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/niches/{id}/sub-niches",
    params(("id" = String, Path, description = "Niche ID")),
    responses(
        (status = 200, description = "Sub-niches of the niche, ordered by name", body = [crate::database::entities::sub_niches::Model])
    )
)]
pub async fn list_sub_niches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<sub_niches::Model>>, StatusCode> {
    let sub_niches = service(&state)
        .list_sub_niches(&id)
        .await
        .map_err(error_status)?;
    Ok(Json(sub_niches))
}

#[utoipa::path(
    post,
    path = "/api/v1/niches/{id}/sub-niches",
    params(("id" = String, Path, description = "Niche ID")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Sub-niche created", body = crate::database::entities::sub_niches::Model),
        (status = 404, description = "Niche not found")
    )
)]
pub async fn create_sub_niche(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<sub_niches::Model>, StatusCode> {
    let sub_niche = service(&state)
        .add_sub_niche(&id, &payload.name)
        .await
        .map_err(error_status)?;
    Ok(Json(sub_niche))
}

#[utoipa::path(
    put,
    path = "/api/v1/sub-niches/{id}",
    params(("id" = String, Path, description = "Sub-niche ID")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Sub-niche renamed", body = crate::database::entities::sub_niches::Model),
        (status = 404, description = "Sub-niche not found")
    )
)]
pub async fn update_sub_niche(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<sub_niches::Model>, StatusCode> {
    let sub_niche = service(&state)
        .rename_sub_niche(&id, &payload.name)
        .await
        .map_err(error_status)?;
    Ok(Json(sub_niche))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sub-niches/{id}",
    params(("id" = String, Path, description = "Sub-niche ID")),
    responses(
        (status = 204, description = "Sub-niche deleted"),
        (status = 404, description = "Sub-niche not found")
    )
)]
pub async fn delete_sub_niche(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    service(&state)
        .delete_sub_niche(&id)
        .await
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}
