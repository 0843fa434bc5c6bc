pub mod config;
pub mod issuance;
pub mod maintenance;
pub mod session;
pub mod settings;
pub mod storage;
pub mod verification;

#[cfg(test)]
mod stubs;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use veritas_auth::{GoTrueClient, IdentityConfig};
use veritas_core::backend::{
    DocumentStore, IdentityProvider, ObjectStorage, SettingsStore, StudentStore,
};
use veritas_core::error::Result;
use veritas_db::{PgDocumentStore, PgSettingsStore, PgStudentStore};

pub use config::Config;

/// The orchestration layer. Every external collaborator sits behind a trait
/// seam so the flows can be exercised against in-memory stubs.
pub struct VeritasService {
    pub(crate) documents: Arc<dyn DocumentStore>,
    pub(crate) students: Arc<dyn StudentStore>,
    pub(crate) settings: Arc<dyn SettingsStore>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) storage: Arc<dyn ObjectStorage>,
    pub(crate) public_base_url: String,
    pub(crate) admin_emails: Vec<String>,
}

impl VeritasService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        students: Arc<dyn StudentStore>,
        settings: Arc<dyn SettingsStore>,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
        public_base_url: String,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            documents,
            students,
            settings,
            identity,
            storage,
            public_base_url,
            admin_emails,
        }
    }

    /// Wires the production collaborators: Postgres pool, S3 client and the
    /// identity provider. Fails fast on missing credentials, before any side
    /// effect is possible.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await
            .map_err(|e| veritas_core::Error::Store(e.to_string()))?;

        let identity = GoTrueClient::new(IdentityConfig {
            base_url: config.identity_url.clone(),
            anon_key: config.identity_anon_key.clone(),
            service_key: config.identity_service_key.clone(),
        })?;

        let storage = storage::S3Storage::connect(config).await;

        Ok(Self::new(
            Arc::new(PgDocumentStore::new(pool.clone())),
            Arc::new(PgStudentStore::new(pool.clone())),
            Arc::new(PgSettingsStore::new(pool)),
            Arc::new(identity),
            Arc::new(storage),
            config.public_base_url.clone(),
            config.admin_emails.clone(),
        ))
    }

    /// Public `/verify/{code}` link for a lookup code.
    pub fn verify_url(&self, code: &str) -> String {
        veritas_core::models::verify_url(&self.public_base_url, code)
    }
}
