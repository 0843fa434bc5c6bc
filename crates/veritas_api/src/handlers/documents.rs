use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;

use veritas_service::issuance::{CreateDocumentParams, IssuedDocument};

use crate::handlers::read_file_field;
use crate::{bearer_token, ApiResult, AppState};

/// Admin-only ad-hoc PDF registration. The response carries the new id,
/// which doubles as the public lookup code.
pub async fn upload_document(
    State(svc): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<IssuedDocument>> {
    svc.require_admin(bearer_token(&headers)?).await?;

    let (file_name, content_type, bytes) = read_file_field(&mut multipart, "file").await?;

    let issued = svc
        .create_document(CreateDocumentParams {
            file_name,
            bytes,
            content_type,
        })
        .await?;
    Ok(Json(issued))
}
