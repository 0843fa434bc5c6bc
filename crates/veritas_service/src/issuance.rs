use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use veritas_core::error::Result;
use veritas_core::generate_validation_code;
use veritas_core::models::student::{
    default_issue_date, default_registration_book, DEFAULT_ACADEMIC_PERIOD,
    DEFAULT_AVERAGE_GRADE, DEFAULT_HOURS_PCT,
};
use veritas_core::models::{DocumentRecord, EnrollmentStatus, StudentProfile};

use crate::VeritasService;

// ---------------------------------------------------------------------------
// Ad-hoc document upload
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct CreateDocumentParams {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, serde::Serialize)]
pub struct IssuedDocument {
    pub id: Uuid,
    pub file_url: String,
    pub verify_url: String,
}

// ---------------------------------------------------------------------------
// Student issuance
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateStudentParams {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub course_name: String,
    #[serde(default)]
    pub registration_number: String,
    #[serde(default)]
    pub diploma_url: String,
    /// Caller-supplied lookup code; generated when absent.
    #[serde(default)]
    pub validation_code: Option<String>,
    // Academic fields below all have fixed defaults.
    #[serde(default)]
    pub enrollment_status: Option<EnrollmentStatus>,
    #[serde(default)]
    pub academic_period: Option<String>,
    #[serde(default)]
    pub average_grade: Option<String>,
    #[serde(default)]
    pub mandatory_hours_pct: Option<String>,
    #[serde(default)]
    pub complementary_hours_pct: Option<String>,
    #[serde(default)]
    pub registration_book: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct IssuedStudent {
    pub account_id: Uuid,
    pub validation_code: String,
    pub verify_url: String,
}

impl VeritasService {
    /// Stores the file under a generated unique key, resolves its public URL
    /// and inserts the document row. Single side effect pair, no compensation
    /// needed.
    pub async fn create_document(&self, params: CreateDocumentParams) -> Result<IssuedDocument> {
        let id = Uuid::new_v4();
        let key = match params.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
            _ => id.to_string(),
        };

        self.storage
            .upload(&key, params.bytes, &params.content_type)
            .await?;
        let file_url = self.storage.public_url(&key);

        let doc = DocumentRecord {
            id,
            original_file_name: params.file_name,
            file_url: file_url.clone(),
            created_at: Utc::now(),
        };
        self.documents.insert(&doc).await?;

        tracing::info!(document = %id, "document registered");

        Ok(IssuedDocument {
            id,
            file_url,
            verify_url: self.verify_url(&id.to_string()),
        })
    }

    /// Two-step create: identity account, then profile row keyed by the new
    /// account id. The steps are independent network calls — on a failed
    /// profile insert the account is deleted again (best-effort compensation,
    /// not a transaction).
    pub async fn create_student(&self, params: CreateStudentParams) -> Result<IssuedStudent> {
        // 1. Identity account (provider error passes through verbatim)
        let account_id = self
            .identity
            .create_user(&params.email, &params.password, &params.full_name)
            .await?;

        // 2. Profile row, with the caller's code or a fresh one
        let validation_code = params
            .validation_code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(generate_validation_code);

        let now = Utc::now();
        let profile = StudentProfile {
            id: account_id,
            full_name: params.full_name,
            course_name: params.course_name,
            registration_number: params.registration_number,
            diploma_url: params.diploma_url,
            validation_code: validation_code.clone(),
            enrollment_status: params
                .enrollment_status
                .unwrap_or(EnrollmentStatus::Concluido),
            academic_period: params
                .academic_period
                .unwrap_or_else(|| DEFAULT_ACADEMIC_PERIOD.to_string()),
            average_grade: params
                .average_grade
                .unwrap_or_else(|| DEFAULT_AVERAGE_GRADE.to_string()),
            mandatory_hours_pct: params
                .mandatory_hours_pct
                .unwrap_or_else(|| DEFAULT_HOURS_PCT.to_string()),
            complementary_hours_pct: params
                .complementary_hours_pct
                .unwrap_or_else(|| DEFAULT_HOURS_PCT.to_string()),
            registration_book: params
                .registration_book
                .unwrap_or_else(|| default_registration_book(now)),
            issue_date: params.issue_date.unwrap_or_else(|| default_issue_date(now)),
            created_at: now,
        };

        if let Err(insert_err) = self.students.insert(&profile).await {
            // 3. Compensation: the account must not be left orphaned. If the
            // delete itself fails, manual cleanup is required — log it loudly
            // but still surface the original insert error.
            if let Err(comp_err) = self.identity.delete_user(account_id).await {
                tracing::error!(
                    account = %account_id,
                    error = %comp_err,
                    "compensating account delete failed; manual cleanup required"
                );
            } else {
                tracing::warn!(
                    account = %account_id,
                    "profile insert failed; identity account rolled back"
                );
            }
            return Err(insert_err);
        }

        tracing::info!(account = %account_id, "student issued");

        let verify_url = self.verify_url(&validation_code);
        Ok(IssuedStudent {
            account_id,
            validation_code,
            verify_url,
        })
    }
}
