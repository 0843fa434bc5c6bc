use serde::Serialize;

use veritas_core::backend::{AuthSession, AuthUser};
use veritas_core::error::{Error, Result};
use veritas_core::models::StudentProfile;

use crate::VeritasService;

/// What the logged-in student sees: their own record plus the public
/// verification link (the QR payload).
#[derive(Debug, Serialize)]
pub struct StudentPortalView {
    pub profile: StudentProfile,
    pub verify_url: String,
}

impl VeritasService {
    /// Password sign-in against the identity provider. The provider's error
    /// message is handed back verbatim for inline rendering.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.identity.sign_in(email, password).await
    }

    /// Resolves a bearer token to the caller's own diploma record.
    ///
    /// `Ok(None)` means "anonymous" — the portal surface redirects to the
    /// login page. An authenticated account without a profile row also counts
    /// as anonymous rather than an error (the account may predate issuance).
    pub async fn student_session(&self, access_token: &str) -> Result<Option<StudentPortalView>> {
        let Some(user) = self.identity.user_from_token(access_token).await? else {
            return Ok(None);
        };

        let Some(profile) = self.students.find_by_id(user.id).await? else {
            tracing::warn!(account = %user.id, "authenticated account has no diploma record");
            return Ok(None);
        };

        let verify_url = self.verify_url(&profile.validation_code);
        Ok(Some(StudentPortalView {
            profile,
            verify_url,
        }))
    }

    /// Admin gate: a real identity-provider session whose e-mail is on the
    /// configured admin list. (The legacy client-side shared-secret compare
    /// was deliberately not carried over.)
    pub async fn require_admin(&self, access_token: &str) -> Result<AuthUser> {
        let user = self
            .identity
            .user_from_token(access_token)
            .await?
            .ok_or(Error::Unauthenticated)?;

        let email = user
            .email
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if email.is_empty() || !self.admin_emails.contains(&email) {
            return Err(Error::Forbidden(
                "account is not an administrator".to_string(),
            ));
        }

        Ok(user)
    }
}
