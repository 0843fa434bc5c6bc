use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use veritas_core::models::NormalizedRecord;

use crate::{ApiResult, AppState};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Public lookup. The code may be a document id or a student validation
/// code; either resolves to the same normalized shape.
pub async fn verify_code(
    State(svc): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<NormalizedRecord>> {
    let record = svc.resolve(&code).await?;
    Ok(Json(record))
}
