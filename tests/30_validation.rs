mod common;

use anyhow::Result;
use axum::http::StatusCode;

use election_map_api::testing::fixture;

#[tokio::test]
async fn short_village_code_is_invalid() -> Result<()> {
    let path = "/api/area?year=2024&provinceCode=63&cityCode=000&townCode=010&villageCode=003";
    let (status, body) = common::get(common::router(), path).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FIELD");
    assert_eq!(body["field_errors"][0]["field"], "villageCode");
    assert_eq!(body["field_errors"][0]["message"], "String must contain exactly 4 character(s)");
    Ok(())
}

#[tokio::test]
async fn year_is_required() -> Result<()> {
    let (status, body) = common::get(common::router(), "/api/area?provinceCode=63").await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"][0]["field"], "year");
    assert_eq!(body["field_errors"][0]["message"], "Required");
    Ok(())
}

#[tokio::test]
async fn validation_runs_before_the_store() -> Result<()> {
    // a failing store would answer 500; invalid input must not reach it
    let router = common::router_with(fixture().failing());
    let (status, _) = common::get(router, "/api/area?year=24").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_area_is_not_found() -> Result<()> {
    let path = "/api/area?year=2024&provinceCode=63&cityCode=000&townCode=999";
    let (status, body) = common::get(common::router(), path).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = common::get(common::router(), "/api/area?year=1996").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn store_failure_is_a_generic_server_error() -> Result<()> {
    let router = common::router_with(fixture().failing());
    let (status, body) = common::get(router, "/api/area?year=2024").await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert!(!body["message"].as_str().unwrap_or_default().contains("store unavailable"));
    Ok(())
}
