use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use veritas_core::models::StudentProfile;
use veritas_service::issuance::{CreateStudentParams, IssuedStudent};
use veritas_service::maintenance::UpdateStudentParams;

use crate::{bearer_token, ApiResult, AppState};

/// Admin-only two-step issuance (identity account plus diploma row).
pub async fn create_student(
    State(svc): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<CreateStudentParams>,
) -> ApiResult<(StatusCode, Json<IssuedStudent>)> {
    svc.require_admin(bearer_token(&headers)?).await?;

    let issued = svc.create_student(params).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

pub async fn list_students(
    State(svc): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<StudentProfile>>> {
    svc.require_admin(bearer_token(&headers)?).await?;

    let students = svc.list_students().await?;
    Ok(Json(students))
}

/// Partial update; absent fields keep their stored values.
pub async fn update_student(
    State(svc): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateStudentParams>,
) -> ApiResult<StatusCode> {
    svc.require_admin(bearer_token(&headers)?).await?;

    svc.update_student(id, params).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_student(
    State(svc): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    svc.require_admin(bearer_token(&headers)?).await?;

    svc.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
