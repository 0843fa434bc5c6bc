pub mod documents;
pub mod session;
pub mod settings;
pub mod students;
pub mod verify;

use axum::extract::multipart::{Multipart, MultipartError};

use veritas_core::Error;

use crate::ApiError;

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError(Error::Invalid(format!("malformed multipart body: {err}")))
}

/// Reads the named file field out of a multipart body.
pub(crate) async fn read_file_field(
    multipart: &mut Multipart,
    name: &str,
) -> Result<(String, String, Vec<u8>), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(name) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("arquivo").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(bad_multipart)?;
        return Ok((file_name, content_type, bytes.to_vec()));
    }

    Err(ApiError(Error::Invalid(format!(
        "multipart field \"{name}\" is required"
    ))))
}
