use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use veritas_core::models::{SettingsPatch, SiteSettings};

use crate::handlers::read_file_field;
use crate::{bearer_token, ApiResult, AppState};

/// Public: every page pulls its branding from here.
pub async fn get_settings(State(svc): State<AppState>) -> ApiResult<Json<SiteSettings>> {
    let settings = svc.get_settings().await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(svc): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<StatusCode> {
    svc.require_admin(bearer_token(&headers)?).await?;

    svc.update_settings(patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stores the logo file and persists its public URL into the settings row.
pub async fn upload_logo(
    State(svc): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    svc.require_admin(bearer_token(&headers)?).await?;

    let (file_name, content_type, bytes) = read_file_field(&mut multipart, "file").await?;
    let logo_url = svc.upload_logo(&file_name, bytes, &content_type).await?;
    Ok(Json(json!({ "logo_url": logo_url })))
}
