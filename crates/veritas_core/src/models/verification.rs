use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::DocumentRecord;
use super::student::StudentProfile;

/// The single display shape both record kinds normalize into for the public
/// verification page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// The code the visitor looked up: a document id or a validation code.
    pub code: String,
    pub title: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl NormalizedRecord {
    pub fn from_document(doc: &DocumentRecord) -> Self {
        Self {
            code: doc.id.to_string(),
            title: doc.original_file_name.clone(),
            file_url: doc.file_url.clone(),
            created_at: doc.created_at,
        }
    }

    pub fn from_student(profile: &StudentProfile) -> Self {
        Self {
            code: profile.validation_code.clone(),
            title: format!(
                "Diploma - {} ({})",
                profile.full_name, profile.course_name
            ),
            file_url: profile.diploma_url.clone(),
            created_at: profile.created_at,
        }
    }
}

/// Builds the public `/verify/{code}` URL (also used as the QR payload).
pub fn verify_url(public_base: &str, code: &str) -> String {
    format!("{}/verify/{}", public_base.trim_end_matches('/'), code)
}
