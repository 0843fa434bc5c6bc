use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use veritas_core::backend::AuthSession;
use veritas_core::Error;
use veritas_service::session::StudentPortalView;

use crate::{bearer_token, ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Password login. Returns the provider session token; the provider's own
/// error message comes back on a 400 so the login form can show it inline.
pub async fn login(
    State(svc): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthSession>> {
    let session = svc.sign_in(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// The logged-in student's own record. 401 for anonymous callers, including
/// accounts that have no diploma row yet.
pub async fn portal_profile(
    State(svc): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<StudentPortalView>> {
    let token = bearer_token(&headers)?;
    let view = svc
        .student_session(token)
        .await?
        .ok_or(ApiError(Error::Unauthenticated))?;
    Ok(Json(view))
}
