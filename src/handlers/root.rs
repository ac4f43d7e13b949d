use axum::response::Json;
use serde_json::{json, Value};

/// GET / - Service description
pub async fn get() -> Json<Value> {
    Json(json!({
        "name": "Election Map API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Election results by administrative area",
        "endpoints": {
            "health": "/health",
            "area": "/api/area?year=YYYY[&provinceCode=..&cityCode=..&townCode=..&villageCode=..]",
            "years": "/api/years"
        }
    }))
}
