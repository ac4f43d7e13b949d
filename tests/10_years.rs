mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use election_map_api::testing::MemoryStore;

#[tokio::test]
async fn lists_years_newest_first() -> Result<()> {
    let (status, body) = common::get(common::router(), "/api/years").await?;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body, json!({ "years": [2024, 2020] }));
    Ok(())
}

#[tokio::test]
async fn empty_store_has_no_years() -> Result<()> {
    let (status, body) = common::get(common::router_with(MemoryStore::default()), "/api/years").await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn health_reports_store_state() -> Result<()> {
    let (status, body) = common::get(common::router(), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let failing = common::router_with(election_map_api::testing::fixture().failing());
    let (status, body) = common::get(failing, "/health").await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn root_describes_endpoints() -> Result<()> {
    let (status, body) = common::get(common::router(), "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].get("area").is_some(), "missing area endpoint: {}", body);
    Ok(())
}
