use axum::{extract::State, response::Json};

use crate::app::AppState;
use crate::area::YearsResult;
use crate::error::ApiResult;

/// GET /api/years - Election years with results, newest first
pub async fn get(State(state): State<AppState>) -> ApiResult<YearsResult> {
    let years = state.service.list_years().await?;
    Ok(Json(YearsResult { years }))
}
