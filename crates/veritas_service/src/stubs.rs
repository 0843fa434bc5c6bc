//! In-memory stand-ins for the backend collaborators, used by the
//! service tests. Failure injection is one-shot: `fail_next_*` arms a single
//! error for the next matching call.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use veritas_core::backend::{
    AuthSession, AuthUser, DocumentStore, IdentityProvider, ObjectStorage, SettingsStore,
    StudentStore,
};
use veritas_core::error::{Error, Result};
use veritas_core::models::{
    DocumentRecord, EnrollmentStatus, SettingsPatch, SiteSettings, StudentPatch,
    StudentProfile,
};

use crate::VeritasService;

pub fn sample_profile(validation_code: &str) -> StudentProfile {
    StudentProfile {
        id: Uuid::new_v4(),
        full_name: "Ana Silva".to_string(),
        course_name: "Direito".to_string(),
        registration_number: "2020123456".to_string(),
        diploma_url: "https://files.example/diploma.pdf".to_string(),
        validation_code: validation_code.to_string(),
        enrollment_status: EnrollmentStatus::Concluido,
        academic_period: "2023.2".to_string(),
        average_grade: "8.75".to_string(),
        mandatory_hours_pct: "100%".to_string(),
        complementary_hours_pct: "100%".to_string(),
        registration_book: "LB-2024/001".to_string(),
        issue_date: "01/12/2024".to_string(),
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubDocuments {
    rows: Mutex<Vec<DocumentRecord>>,
    fail_next_find: AtomicBool,
}

impl StubDocuments {
    pub fn seed(&self, doc: DocumentRecord) {
        self.rows.lock().unwrap().push(doc);
    }

    pub fn fail_next_find(&self) {
        self.fail_next_find.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for StubDocuments {
    async fn insert(&self, doc: &DocumentRecord) -> Result<()> {
        self.rows.lock().unwrap().push(doc.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<DocumentRecord>> {
        if self.fail_next_find.swap(false, Ordering::SeqCst) {
            return Err(Error::Store("connection refused".to_string()));
        }
        let code = code.trim();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id.to_string() == code)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubStudents {
    rows: Mutex<HashMap<Uuid, StudentProfile>>,
    fail_next_insert: AtomicBool,
    code_probes: AtomicUsize,
}

impl StubStudents {
    pub fn seed(&self, profile: StudentProfile) {
        self.rows.lock().unwrap().insert(profile.id, profile);
    }

    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::SeqCst);
    }

    pub fn by_id(&self, id: Uuid) -> Option<StudentProfile> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn profile_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// How many times the validation-code lookup was attempted.
    pub fn code_probe_count(&self) -> usize {
        self.code_probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StudentStore for StubStudents {
    async fn insert(&self, profile: &StudentProfile) -> Result<()> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(Error::Store(
                "duplicate key value violates unique constraint \
                 \"diploma_students_validation_code_key\""
                    .to_string(),
            ));
        }
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|p| p.validation_code == profile.validation_code)
        {
            return Err(Error::Store(
                "duplicate key value violates unique constraint \
                 \"diploma_students_validation_code_key\""
                    .to_string(),
            ));
        }
        rows.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &StudentPatch) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let profile = rows
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        patch.apply(profile);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentProfile>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_validation_code(&self, code: &str) -> Result<Option<StudentProfile>> {
        self.code_probes.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|p| p.validation_code == code.trim())
            .cloned())
    }

    async fn list(&self) -> Result<Vec<StudentProfile>> {
        let mut all: Vec<_> = self.rows.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubSettings {
    row: Mutex<Option<SiteSettings>>,
}

impl StubSettings {
    pub fn current(&self) -> Option<SiteSettings> {
        self.row.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsStore for StubSettings {
    async fn get(&self) -> Result<Option<SiteSettings>> {
        Ok(self.row.lock().unwrap().clone())
    }

    async fn update(&self, patch: &SettingsPatch) -> Result<()> {
        let mut row = self.row.lock().unwrap();
        let mut settings = row.take().unwrap_or_default();
        patch.apply(&mut settings);
        *row = Some(settings);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Identity provider
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubIdentity {
    accounts: Mutex<HashMap<Uuid, String>>,
    sessions: Mutex<HashMap<String, Uuid>>,
    fail_next_create: Mutex<Option<String>>,
    fail_next_update: Mutex<Option<String>>,
    fail_next_delete: Mutex<Option<String>>,
}

impl StubIdentity {
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn fail_next_create(&self, message: &str) {
        *self.fail_next_create.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_next_update(&self, message: &str) {
        *self.fail_next_update.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_next_delete(&self, message: &str) {
        *self.fail_next_delete.lock().unwrap() = Some(message.to_string());
    }

    /// Registers an account and a live token for it; returns the token.
    pub fn seed_session(&self, id: Uuid, email: &str) -> String {
        self.accounts.lock().unwrap().insert(id, email.to_string());
        let token = format!("token-{}", Uuid::new_v4());
        self.sessions.lock().unwrap().insert(token.clone(), id);
        token
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn create_user(&self, email: &str, _password: &str, _full_name: &str) -> Result<Uuid> {
        if let Some(msg) = self.fail_next_create.lock().unwrap().take() {
            return Err(Error::Auth(msg));
        }
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|e| e == email) {
            return Err(Error::Auth("User already registered".to_string()));
        }
        let id = Uuid::new_v4();
        accounts.insert(id, email.to_string());
        Ok(id)
    }

    async fn update_user(&self, id: Uuid, email: &str, _full_name: Option<&str>) -> Result<()> {
        if let Some(msg) = self.fail_next_update.lock().unwrap().take() {
            return Err(Error::Auth(msg));
        }
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&id) {
            Some(stored) => {
                *stored = email.to_string();
                Ok(())
            }
            None => Err(Error::Auth("User not found".to_string())),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        if let Some(msg) = self.fail_next_delete.lock().unwrap().take() {
            return Err(Error::Auth(msg));
        }
        match self.accounts.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::Auth("User not found".to_string())),
        }
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession> {
        let accounts = self.accounts.lock().unwrap();
        let id = accounts
            .iter()
            .find(|(_, e)| e.as_str() == email)
            .map(|(id, _)| *id)
            .ok_or_else(|| Error::Auth("Invalid login credentials".to_string()))?;
        drop(accounts);

        let token = format!("token-{}", Uuid::new_v4());
        self.sessions.lock().unwrap().insert(token.clone(), id);
        Ok(AuthSession {
            access_token: token,
            user_id: id,
        })
    }

    async fn user_from_token(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let sessions = self.sessions.lock().unwrap();
        let Some(id) = sessions.get(access_token).copied() else {
            return Ok(None);
        };
        drop(sessions);

        let email = self.accounts.lock().unwrap().get(&id).cloned();
        Ok(Some(AuthUser { id, email }))
    }
}

// ---------------------------------------------------------------------------
// Object storage
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubStorage {
    uploads: Mutex<Vec<(String, String, usize)>>,
}

impl StubStorage {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for StubStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), bytes.len()));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://files.test/documentos/{key}")
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct TestHarness {
    pub service: VeritasService,
    pub documents: Arc<StubDocuments>,
    pub students: Arc<StubStudents>,
    pub settings: Arc<StubSettings>,
    pub identity: Arc<StubIdentity>,
    pub storage: Arc<StubStorage>,
}

impl TestHarness {
    pub fn new() -> Self {
        let documents = Arc::new(StubDocuments::default());
        let students = Arc::new(StubStudents::default());
        let settings = Arc::new(StubSettings::default());
        let identity = Arc::new(StubIdentity::default());
        let storage = Arc::new(StubStorage::default());

        let service = VeritasService::new(
            documents.clone(),
            students.clone(),
            settings.clone(),
            identity.clone(),
            storage.clone(),
            "http://localhost:3000".to_string(),
            vec!["admin@veritas.example".to_string()],
        );

        Self {
            service,
            documents,
            students,
            settings,
            identity,
            storage,
        }
    }
}
