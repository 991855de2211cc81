use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error_status;
use crate::database::entities::{design_mockups, designs};
use crate::server::app::AppState;
use crate::services::design_service::{
    DesignDetail, DesignDraft, DesignService, DesignSummary, NewMockupImage,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DesignRequest {
    pub title: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub theme_id: Option<String>,
    pub niche_id: Option<String>,
    pub sub_niche_id: Option<String>,
}

impl DesignRequest {
    fn into_draft(self, id: Option<String>) -> DesignDraft {
        DesignDraft {
            id,
            title: self.title,
            slogan: self.slogan,
            description: self.description,
            theme_id: self.theme_id,
            niche_id: self.niche_id,
            sub_niche_id: self.sub_niche_id,
            images: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct UploadParams {
    pub filename: String,
}

fn service(state: &AppState) -> DesignService {
    DesignService::new(state.db.clone(), state.store.clone())
}

#[utoipa::path(
    get,
    path = "/api/v1/designs",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive search over title and slogan")
    ),
    responses(
        (status = 200, description = "Designs, newest first, with taxonomy names and mockup URLs", body = [crate::services::design_service::DesignSummary])
    )
)]
pub async fn list_designs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DesignSummary>>, StatusCode> {
    let designs = service(&state)
        .list(params.q.as_deref())
        .await
        .map_err(error_status)?;
    Ok(Json(designs))
}

#[utoipa::path(
    get,
    path = "/api/v1/designs/{id}",
    params(("id" = String, Path, description = "Design ID")),
    responses(
        (status = 200, description = "Design with taxonomy names and mockups", body = crate::services::design_service::DesignDetail),
        (status = 404, description = "Design not found")
    )
)]
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DesignDetail>, StatusCode> {
    let detail = service(&state)
        .detail(&id)
        .await
        .map_err(error_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/v1/designs",
    request_body = DesignRequest,
    responses(
        (status = 200, description = "Design created", body = crate::database::entities::designs::Model),
        (status = 400, description = "Blank title")
    )
)]
pub async fn create_design(
    State(state): State<AppState>,
    Json(payload): Json<DesignRequest>,
) -> Result<Json<designs::Model>, StatusCode> {
    let design = service(&state)
        .save(payload.into_draft(None))
        .await
        .map_err(error_status)?;
    Ok(Json(design))
}

#[utoipa::path(
    put,
    path = "/api/v1/designs/{id}",
    params(("id" = String, Path, description = "Design ID")),
    request_body = DesignRequest,
    responses(
        (status = 200, description = "Design updated", body = crate::database::entities::designs::Model),
        (status = 404, description = "Design not found")
    )
)]
pub async fn update_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DesignRequest>,
) -> Result<Json<designs::Model>, StatusCode> {
    let design = service(&state)
        .save(payload.into_draft(Some(id)))
        .await
        .map_err(error_status)?;
    Ok(Json(design))
}

#[utoipa::path(
    post,
    path = "/api/v1/designs/{id}/mockups",
    params(
        ("id" = String, Path, description = "Design ID"),
        ("filename" = String, Query, description = "Client filename of the uploaded image")
    ),
    request_body(content = Vec<u8>, description = "Raw image bytes"),
    responses(
        (status = 200, description = "Mockup rows created for the uploads that succeeded", body = [crate::database::entities::design_mockups::Model]),
        (status = 404, description = "Design not found")
    )
)]
pub async fn upload_mockup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<Vec<design_mockups::Model>>, StatusCode> {
    let image = NewMockupImage {
        filename: params.filename,
        bytes: body.to_vec(),
    };
    let attached = service(&state)
        .attach_mockups(&id, vec![image])
        .await
        .map_err(error_status)?;
    Ok(Json(attached))
}

#[utoipa::path(
    delete,
    path = "/api/v1/mockups/{id}",
    params(("id" = String, Path, description = "Mockup ID")),
    responses(
        (status = 204, description = "Mockup row deleted; the blob delete is best-effort"),
        (status = 404, description = "Mockup not found")
    )
)]
pub async fn delete_mockup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    service(&state)
        .delete_mockup(&id)
        .await
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}
