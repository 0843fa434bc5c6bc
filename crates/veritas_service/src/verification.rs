use veritas_core::error::{Error, Result};
use veritas_core::models::NormalizedRecord;

use crate::VeritasService;

impl VeritasService {
    /// Resolves an opaque public code against the two record kinds, in order:
    /// ad-hoc documents first (by row id), then student diplomas (by
    /// validation code). The document probe runs to completion before the
    /// student table is touched.
    ///
    /// A store failure during either probe is logged distinguishably but
    /// treated as "try the next source" — the public page shows the same
    /// not-found screen either way.
    pub async fn resolve(&self, code: &str) -> Result<NormalizedRecord> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::NotFound(String::new()));
        }

        // 1. Ad-hoc documents
        match self.documents.find_by_code(code).await {
            Ok(Some(doc)) => return Ok(NormalizedRecord::from_document(&doc)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(code, error = %e, "document lookup failed; falling through");
            }
        }

        // 2. Student diplomas
        match self.students.find_by_validation_code(code).await {
            Ok(Some(profile)) => return Ok(NormalizedRecord::from_student(&profile)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(code, error = %e, "student lookup failed; reporting not found");
            }
        }

        Err(Error::NotFound(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::TestHarness;
    use chrono::Utc;
    use uuid::Uuid;
    use veritas_core::models::DocumentRecord;

    #[tokio::test]
    async fn document_hit_never_probes_the_student_table() {
        let h = TestHarness::new();

        let doc = DocumentRecord {
            id: Uuid::new_v4(),
            original_file_name: "historico.pdf".to_string(),
            file_url: "https://files.example/h.pdf".to_string(),
            created_at: Utc::now(),
        };
        h.documents.seed(doc.clone());

        let record = h.service.resolve(&doc.id.to_string()).await.unwrap();
        assert_eq!(record.title, "historico.pdf");
        assert_eq!(h.students.code_probe_count(), 0);
    }

    #[tokio::test]
    async fn miss_on_documents_falls_through_to_students() {
        let h = TestHarness::new();
        h.students.seed(crate::stubs::sample_profile("ABC123"));

        let record = h.service.resolve("ABC123").await.unwrap();
        assert_eq!(record.title, "Diploma - Ana Silva (Direito)");
        assert_eq!(record.file_url, "https://files.example/diploma.pdf");
        assert_eq!(record.code, "ABC123");
    }

    #[tokio::test]
    async fn unmatched_codes_report_not_found() {
        let h = TestHarness::new();
        h.students.seed(crate::stubs::sample_profile("ABC123"));

        for code in ["", "   ", "XYZ999", "not-a-uuid", "123e4567-e89b-12d3-a456-zzzzzzzzzzzz"] {
            let err = h.service.resolve(code).await.unwrap_err();
            assert!(
                matches!(err, Error::NotFound(_)),
                "expected NotFound for {code:?}, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn store_failure_during_document_probe_still_tries_students() {
        let h = TestHarness::new();
        h.documents.fail_next_find();
        h.students.seed(crate::stubs::sample_profile("ABC123"));

        // A connectivity error on the first probe must not mask a hit in
        // the second table.
        let record = h.service.resolve("ABC123").await.unwrap();
        assert_eq!(record.code, "ABC123");
    }
}
