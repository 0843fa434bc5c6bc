//! Seams for the three external collaborators: the identity provider, the
//! object storage and the relational store. Production implementations live in
//! `veritas_auth`, `veritas_service::storage` and `veritas_db`; the service
//! tests run against in-memory stubs of these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    DocumentRecord, SettingsPatch, SiteSettings, StudentPatch, StudentProfile,
};

/// An authenticated identity-provider user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// A signed-in session, as handed back to the login surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: Uuid,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account (email confirmed, display name in the metadata)
    /// and returns the new account id.
    async fn create_user(&self, email: &str, password: &str, full_name: &str) -> Result<Uuid>;

    /// Updates an account's email and, when supplied, its display name.
    async fn update_user(&self, id: Uuid, email: &str, full_name: Option<&str>) -> Result<()>;

    async fn delete_user(&self, id: Uuid) -> Result<()>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Resolves a bearer token to its user. `Ok(None)` means "no valid
    /// session" (an anonymous caller), not a provider failure.
    async fn user_from_token(&self, access_token: &str) -> Result<Option<AuthUser>>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Public URL for a stored key. Pure string assembly, no round trip.
    fn public_url(&self, key: &str) -> String;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, doc: &DocumentRecord) -> Result<()>;

    /// Lookup by the public code. A code that cannot possibly be a document
    /// id (e.g. not a UUID) is a clean miss, not an error.
    async fn find_by_code(&self, code: &str) -> Result<Option<DocumentRecord>>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn insert(&self, profile: &StudentProfile) -> Result<()>;

    async fn update(&self, id: Uuid, patch: &StudentPatch) -> Result<()>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentProfile>>;

    async fn find_by_validation_code(&self, code: &str) -> Result<Option<StudentProfile>>;

    /// All profiles, newest first (admin listing).
    async fn list(&self) -> Result<Vec<StudentProfile>>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> Result<Option<SiteSettings>>;

    async fn update(&self, patch: &SettingsPatch) -> Result<()>;
}
