//! API integration tests
//!
//! Tests for the REST endpoints: taxonomy CRUD with cascades, design
//! management, mockup upload/delete, and the SEO round trip.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use motif::database::connection::setup_database;
use motif::errors::StudioError;
use motif::seo::{SeoRequest, SeoWorkflow};
use motif::server::app::create_app;
use motif::storage::FsMockupStore;
use sea_orm::Database;
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};

/// Canned workflow double: answers the analysis with a `data`-wrapped
/// keyword array and the write with a one-element array envelope.
struct StubWorkflow;

#[async_trait]
impl SeoWorkflow for StubWorkflow {
    async fn dispatch(&self, request: &SeoRequest) -> Result<Value, StudioError> {
        if request.action == "AnalyseSEO" {
            Ok(json!({
                "data": [{
                    "keyword": "dog mom shirt",
                    "avg_volume": 500,
                    "competition": 0.3,
                    "opportunity_score": 72,
                    "volumes_history": [100, 200, 500],
                    "status": {"trending": true, "evergreen": false, "promising": true}
                }]
            }))
        } else {
            Ok(json!([{
                "output": {"title": "Dog Mom Tee", "description": "Soft cotton."}
            }]))
        }
    }
}

/// Workflow double that always answers with an HTTP error status.
struct DownWorkflow;

#[async_trait]
impl SeoWorkflow for DownWorkflow {
    async fn dispatch(&self, _request: &SeoRequest) -> Result<Value, StudioError> {
        Err(StudioError::Workflow {
            status: 502,
            reason: "Bad Gateway".to_string(),
        })
    }
}

/// Create a test server with a fresh database, blob directory, and the
/// given workflow double.
async fn setup_test_server(
    workflow: Arc<dyn SeoWorkflow>,
) -> Result<(TestServer, NamedTempFile, TempDir)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let blob_dir = TempDir::new()?;
    let store = Arc::new(FsMockupStore::new(
        blob_dir.path(),
        "http://localhost:3000/mockups",
    ));

    let app = create_app(db, store, workflow, Some(blob_dir.path()), None).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file, blob_dir))
}

async fn create_design(server: &TestServer, title: &str) -> Value {
    let response = server
        .post("/api/v1/designs")
        .json(&json!({"title": title, "slogan": "L'obstacle est le chemin."}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "motif-studio");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_openapi_document() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    let response = server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let doc: Value = response.json();
    assert!(doc["paths"]["/api/v1/themes"].is_object());
    assert!(doc["paths"]["/api/v1/designs/{id}/seo/analyse"].is_object());

    Ok(())
}

#[tokio::test]
async fn test_taxonomy_crud_api() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    // Create a theme
    let response = server
        .post("/api/v1/themes")
        .json(&json!({"name": "Philosophie"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let theme: Value = response.json();
    let theme_id = theme["id"].as_str().unwrap().to_string();

    // Blank names are rejected
    let response = server
        .post("/api/v1/themes")
        .json(&json!({"name": "   "}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Rename
    let response = server
        .put(&format!("/api/v1/themes/{}", theme_id))
        .json(&json!({"name": "Sagesse"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let renamed: Value = response.json();
    assert_eq!(renamed["name"], "Sagesse");

    // Create a niche under the theme, and a sub-niche under that
    let response = server
        .post(&format!("/api/v1/themes/{}/niches", theme_id))
        .json(&json!({"name": "Stoïcisme"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let niche: Value = response.json();
    let niche_id = niche["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/api/v1/niches/{}/sub-niches", niche_id))
        .json(&json!({"name": "Citations antiques"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get(&format!("/api/v1/niches/{}/sub-niches", niche_id))
        .await;
    let sub_niches: Vec<Value> = response.json();
    assert_eq!(sub_niches.len(), 1);

    // Deleting the theme removes the whole subtree
    let response = server.delete(&format!("/api/v1/themes/{}", theme_id)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let themes: Vec<Value> = server.get("/api/v1/themes").await.json();
    assert!(themes.is_empty());

    let orphans: Vec<Value> = server
        .get(&format!("/api/v1/niches/{}/sub-niches", niche_id))
        .await
        .json();
    assert!(orphans.is_empty());

    // Deleting again is a 404
    let response = server.delete(&format!("/api/v1/themes/{}", theme_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_design_crud_and_search_api() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    let theme: Value = server
        .post("/api/v1/themes")
        .json(&json!({"name": "Philosophie"}))
        .await
        .json();

    let response = server
        .post("/api/v1/designs")
        .json(&json!({
            "title": "Memento mori",
            "slogan": "Souviens-toi",
            "theme_id": theme["id"]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let design: Value = response.json();
    let design_id = design["id"].as_str().unwrap().to_string();

    create_design(&server, "Carpe diem").await;

    // Detail view joins taxonomy names
    let detail: Value = server
        .get(&format!("/api/v1/designs/{}", design_id))
        .await
        .json();
    assert_eq!(detail["design"]["title"], "Memento mori");
    assert_eq!(detail["theme_name"], "Philosophie");
    assert_eq!(detail["sub_niche_name"], Value::Null);

    // Listing and search
    let all: Vec<Value> = server.get("/api/v1/designs").await.json();
    assert_eq!(all.len(), 2);

    let hits: Vec<Value> = server.get("/api/v1/designs?q=memento").await.json();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["design"]["title"], "Memento mori");
    assert_eq!(hits[0]["theme_name"], "Philosophie");

    // Update replaces the field values
    let response = server
        .put(&format!("/api/v1/designs/{}", design_id))
        .json(&json!({"title": "Memento vivere"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["title"], "Memento vivere");
    assert_eq!(updated["theme_id"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn test_mockup_upload_and_delete_api() -> Result<()> {
    let (server, _db, blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    let design = create_design(&server, "Design").await;
    let design_id = design["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!(
            "/api/v1/designs/{}/mockups?filename=front%20mock.png",
            design_id
        ))
        .bytes(Bytes::from_static(b"png-bytes"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let attached: Vec<Value> = response.json();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0]["is_primary"], false);
    let mockup_id = attached[0]["id"].as_str().unwrap().to_string();

    // The blob landed under the design directory with a sanitized name.
    let entries: Vec<_> = std::fs::read_dir(blobs.path().join(&design_id))?
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().to_string_lossy().to_string();
    assert!(name.ends_with("_front_mock.png"));

    // Detail view lists the mockup
    let detail: Value = server
        .get(&format!("/api/v1/designs/{}", design_id))
        .await
        .json();
    assert_eq!(detail["mockups"].as_array().unwrap().len(), 1);

    // Upload against an unknown design is a 404
    let response = server
        .post("/api/v1/designs/missing/mockups?filename=a.png")
        .bytes(Bytes::from_static(b"x"))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Delete removes the row and the blob
    let response = server
        .delete(&format!("/api/v1/mockups/{}", mockup_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let detail: Value = server
        .get(&format!("/api/v1/designs/{}", design_id))
        .await
        .json();
    assert!(detail["mockups"].as_array().unwrap().is_empty());
    assert_eq!(std::fs::read_dir(blobs.path().join(&design_id))?.count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_seo_roundtrip_api() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    let design = create_design(&server, "Dog mom").await;
    let design_id = design["id"].as_str().unwrap().to_string();

    // Nothing persisted yet
    let response = server.get(&format!("/api/v1/designs/{}/seo", design_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Analysis normalizes the wrapped response into canonical records
    let response = server
        .post(&format!("/api/v1/designs/{}/seo/analyse", design_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let keywords: Vec<Value> = response.json();
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0]["keyword"], "dog mom shirt");
    assert_eq!(keywords[0]["status"]["trending"], true);

    // Content writing fills the generated copy
    let response = server
        .post(&format!("/api/v1/designs/{}/seo/write", design_id))
        .json(&json!({"keywords": keywords}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let copy: Value = response.json();
    assert_eq!(copy["title"], "Dog Mom Tee");
    assert_eq!(copy["description"], "Soft cotton.");

    // Save, then load back
    let response = server
        .post(&format!("/api/v1/designs/{}/seo", design_id))
        .json(&json!({
            "keywords": keywords,
            "generated_title": copy["title"],
            "generated_description": copy["description"]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let stored: Value = server
        .get(&format!("/api/v1/designs/{}/seo", design_id))
        .await
        .json();
    assert_eq!(stored["analysis"]["generated_title"], "Dog Mom Tee");
    assert_eq!(stored["keywords"].as_array().unwrap().len(), 1);
    assert_eq!(stored["keywords"][0]["keyword"], "dog mom shirt");
    assert_eq!(stored["keywords"][0]["status"]["promising"], true);
    assert_eq!(
        stored["keywords"][0]["volumes_history"],
        json!([100, 200, 500])
    );

    Ok(())
}

#[tokio::test]
async fn test_seo_workflow_failure_maps_to_bad_gateway() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(DownWorkflow)).await?;

    let design = create_design(&server, "Dog mom").await;
    let design_id = design["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/api/v1/designs/{}/seo/analyse", design_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    Ok(())
}

#[tokio::test]
async fn test_error_handling() -> Result<()> {
    let (server, _db, _blobs) = setup_test_server(Arc::new(StubWorkflow)).await?;

    // Unknown design
    let response = server.get("/api/v1/designs/99999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.post("/api/v1/designs/99999/seo/analyse").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Invalid JSON payload
    let response = server
        .post("/api/v1/designs")
        .json(&json!({"invalid": "data"}))
        .await;
    assert!(response.status_code().is_client_error());

    // Blank design title
    let response = server
        .post("/api/v1/designs")
        .json(&json!({"title": "  "}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    Ok(())
}
