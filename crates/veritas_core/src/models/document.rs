use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ad-hoc uploaded document. Immutable after creation; its row id doubles
/// as the public lookup code printed under the QR on the admin screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub original_file_name: String,
    /// Public URL of the stored blob.
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}
