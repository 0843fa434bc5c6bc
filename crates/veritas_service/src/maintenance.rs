use serde::Deserialize;
use uuid::Uuid;

use veritas_core::error::Result;
use veritas_core::models::StudentPatch;

use crate::VeritasService;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentParams {
    /// When present, the identity account's email (and display name, if the
    /// patch carries one) is updated before the profile row is touched.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub patch: StudentPatch,
}

impl VeritasService {
    /// Two independent writes, in a fixed order: identity account first (only
    /// when an email was supplied), then the profile row. A failed identity
    /// update aborts before the profile is touched; the reverse failure is
    /// reported but not rolled back.
    pub async fn update_student(&self, id: Uuid, params: UpdateStudentParams) -> Result<()> {
        if let Some(email) = &params.email {
            self.identity
                .update_user(id, email, params.patch.full_name.as_deref())
                .await?;
        }

        self.students.update(id, &params.patch).await?;

        tracing::info!(account = %id, "student updated");
        Ok(())
    }

    /// Deletes the identity account, then the profile row. The two deletes
    /// are not atomic: if the second fails the account is already gone and
    /// the error is surfaced for manual follow-up.
    pub async fn delete_student(&self, id: Uuid) -> Result<()> {
        self.identity.delete_user(id).await?;
        self.students.delete(id).await?;

        tracing::info!(account = %id, "student deleted");
        Ok(())
    }

    /// All diploma records, newest first, for the admin screen.
    pub async fn list_students(&self) -> Result<Vec<veritas_core::models::StudentProfile>> {
        self.students.list().await
    }
}
