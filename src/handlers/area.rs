use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use tracing::debug;

use crate::api::{AreaParams, FieldError};
use crate::app::AppState;
use crate::area::AreaResult;
use crate::error::{ApiError, ApiResult};

/// GET /api/area - Results for one area with its sub-areas and parents
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<AreaParams>, QueryRejection>,
) -> ApiResult<AreaResult> {
    let Query(params) =
        query.map_err(|rejection| ApiError::invalid_field(vec![FieldError::new("query", rejection.body_text())]))?;

    // Validation runs before anything touches the store
    let request = params
        .validate(state.service.defaults())
        .map_err(ApiError::invalid_field)?;
    debug!(year = request.year, code = %request.code, "Area request");

    let result = state.service.get_area_result(request.year, &request.code).await?;
    Ok(Json(result))
}
