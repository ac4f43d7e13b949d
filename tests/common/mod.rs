use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, Router};
use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use election_map_api::app::{app, AppState};
use election_map_api::area::{AreaService, DEFAULT_CODES};
use election_map_api::config::config;
use election_map_api::testing::{fixture, MemoryStore};

pub fn router_with(store: MemoryStore) -> Router {
    let service = AreaService::from_config(Arc::new(store), DEFAULT_CODES, &config().area);
    app(AppState::new(service), config())
}

/// Router over the fixture dataset
pub fn router() -> Router {
    router_with(fixture())
}

/// Issue a GET against `router` and decode the JSON body
pub async fn get(router: Router, path: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().uri(path).body(Body::empty())?;
    let response = router.oneshot(request).await.context("router failed")?;

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body for {}", path))?;
    Ok((status, body))
}
