use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use veritas_core::backend::{DocumentStore, SettingsStore, StudentStore};
use veritas_core::error::{Error, Result};
use veritas_core::models::{
    DocumentRecord, EnrollmentStatus, SettingsPatch, SiteSettings, StudentPatch,
    StudentProfile, SETTINGS_ROW_ID,
};

fn store_err(e: sqlx::Error) -> Error {
    Error::Store(e.to_string())
}

/// Public lookup codes arrive as free-form strings. Only a well-formed UUID
/// can ever match a document row, so anything else is a miss before we even
/// touch the database.
fn parse_lookup_uuid(code: &str) -> Option<Uuid> {
    Uuid::parse_str(code.trim()).ok()
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    original_file_name: String,
    file_url: String,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        DocumentRecord {
            id: row.id,
            original_file_name: row.original_file_name,
            file_url: row.file_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, doc: &DocumentRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, original_file_name, file_url, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(doc.id)
        .bind(&doc.original_file_name)
        .bind(&doc.file_url)
        .bind(doc.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<DocumentRecord>> {
        let Some(id) = parse_lookup_uuid(code) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, original_file_name, file_url, created_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(DocumentRecord::from))
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    full_name: String,
    course_name: String,
    registration_number: String,
    diploma_url: String,
    validation_code: String,
    enrollment_status: String,
    academic_period: String,
    average_grade: String,
    mandatory_hours_pct: String,
    complementary_hours_pct: String,
    registration_book: String,
    issue_date: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for StudentProfile {
    type Error = Error;

    fn try_from(row: StudentRow) -> Result<Self> {
        let enrollment_status = EnrollmentStatus::try_from(row.enrollment_status)
            .map_err(Error::Store)?;

        Ok(StudentProfile {
            id: row.id,
            full_name: row.full_name,
            course_name: row.course_name,
            registration_number: row.registration_number,
            diploma_url: row.diploma_url,
            validation_code: row.validation_code,
            enrollment_status,
            academic_period: row.academic_period,
            average_grade: row.average_grade,
            mandatory_hours_pct: row.mandatory_hours_pct,
            complementary_hours_pct: row.complementary_hours_pct,
            registration_book: row.registration_book,
            issue_date: row.issue_date,
            created_at: row.created_at,
        })
    }
}

const STUDENT_COLUMNS: &str = r#"
    id, full_name, course_name, registration_number, diploma_url,
    validation_code, enrollment_status, academic_period, average_grade,
    mandatory_hours_pct, complementary_hours_pct, registration_book,
    issue_date, created_at
"#;

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn insert(&self, profile: &StudentProfile) -> Result<()> {
        // The UNIQUE constraint on validation_code is the only uniqueness
        // guard; a violation surfaces here as a store error, verbatim.
        sqlx::query(
            r#"
            INSERT INTO diploma_students
            (id, full_name, course_name, registration_number, diploma_url,
             validation_code, enrollment_status, academic_period, average_grade,
             mandatory_hours_pct, complementary_hours_pct, registration_book,
             issue_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.course_name)
        .bind(&profile.registration_number)
        .bind(&profile.diploma_url)
        .bind(&profile.validation_code)
        .bind(profile.enrollment_status.as_str())
        .bind(&profile.academic_period)
        .bind(&profile.average_grade)
        .bind(&profile.mandatory_hours_pct)
        .bind(&profile.complementary_hours_pct)
        .bind(&profile.registration_book)
        .bind(&profile.issue_date)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &StudentPatch) -> Result<()> {
        // COALESCE keeps omitted fields untouched; this mirrors
        // StudentPatch::apply exactly.
        let result = sqlx::query(
            r#"
            UPDATE diploma_students SET
                full_name = COALESCE($2, full_name),
                course_name = COALESCE($3, course_name),
                registration_number = COALESCE($4, registration_number),
                diploma_url = COALESCE($5, diploma_url),
                enrollment_status = COALESCE($6, enrollment_status),
                academic_period = COALESCE($7, academic_period),
                average_grade = COALESCE($8, average_grade),
                mandatory_hours_pct = COALESCE($9, mandatory_hours_pct),
                complementary_hours_pct = COALESCE($10, complementary_hours_pct),
                registration_book = COALESCE($11, registration_book),
                issue_date = COALESCE($12, issue_date)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.full_name)
        .bind(&patch.course_name)
        .bind(&patch.registration_number)
        .bind(&patch.diploma_url)
        .bind(patch.enrollment_status.map(|s| s.as_str().to_string()))
        .bind(&patch.academic_period)
        .bind(&patch.average_grade)
        .bind(&patch.mandatory_hours_pct)
        .bind(&patch.complementary_hours_pct)
        .bind(&patch.registration_book)
        .bind(&patch.issue_date)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM diploma_students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentProfile>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM diploma_students WHERE id = $1");
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.map(StudentProfile::try_from).transpose()
    }

    async fn find_by_validation_code(&self, code: &str) -> Result<Option<StudentProfile>> {
        let sql =
            format!("SELECT {STUDENT_COLUMNS} FROM diploma_students WHERE validation_code = $1");
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(code.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row.map(StudentProfile::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<StudentProfile>> {
        let sql =
            format!("SELECT {STUDENT_COLUMNS} FROM diploma_students ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        rows.into_iter().map(StudentProfile::try_from).collect()
    }
}

// ---------------------------------------------------------------------------
// Site settings (singleton row)
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct SettingsRow {
    id: i32,
    logo_url: Option<String>,
    institution_name: Option<String>,
}

#[derive(Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self) -> Result<Option<SiteSettings>> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT id, logo_url, institution_name FROM site_settings WHERE id = $1",
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(|r| SiteSettings {
            id: r.id,
            logo_url: r.logo_url,
            institution_name: r.institution_name,
        }))
    }

    async fn update(&self, patch: &SettingsPatch) -> Result<()> {
        // Upsert keeps the singleton alive even if the seed row went missing.
        sqlx::query(
            r#"
            INSERT INTO site_settings (id, logo_url, institution_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                logo_url = COALESCE($2, site_settings.logo_url),
                institution_name = COALESCE($3, site_settings.institution_name)
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(&patch.logo_url)
        .bind(&patch.institution_name)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_codes_never_reach_the_document_table() {
        assert!(parse_lookup_uuid("").is_none());
        assert!(parse_lookup_uuid("ABC123").is_none());
        assert!(parse_lookup_uuid("123e4567-e89b-12d3-a456-XXXXXXXXXXXX").is_none());
    }

    #[test]
    fn well_formed_uuid_parses_after_trim() {
        let id = Uuid::new_v4();
        assert_eq!(parse_lookup_uuid(&format!("  {id}  ")), Some(id));
    }
}
