use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enrollment status vocabulary
// ---------------------------------------------------------------------------

/// Enrollment status as displayed on the portal and stored in the row.
///
/// The wire/database form is the Portuguese uppercase label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "CONCLUÍDO")]
    Concluido,
    #[serde(rename = "CURSANDO")]
    Cursando,
    #[serde(rename = "TRANCADO")]
    Trancado,
    #[serde(rename = "CANCELADO")]
    Cancelado,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Concluido => "CONCLUÍDO",
            EnrollmentStatus::Cursando => "CURSANDO",
            EnrollmentStatus::Trancado => "TRANCADO",
            EnrollmentStatus::Cancelado => "CANCELADO",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for EnrollmentStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "CONCLUÍDO" => Ok(EnrollmentStatus::Concluido),
            "CURSANDO" => Ok(EnrollmentStatus::Cursando),
            "TRANCADO" => Ok(EnrollmentStatus::Trancado),
            "CANCELADO" => Ok(EnrollmentStatus::Cancelado),
            other => Err(format!("unknown enrollment status: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// The profile row
// ---------------------------------------------------------------------------

/// A student's diploma record.
///
/// `id` always equals the identity-account id (referential by construction
/// order only, not enforced by a constraint). `validation_code` is the only
/// key the public verification flow may resolve a student record by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: Uuid,
    pub full_name: String,
    pub course_name: String,
    pub registration_number: String,
    pub diploma_url: String,
    pub validation_code: String,
    pub enrollment_status: EnrollmentStatus,
    pub academic_period: String,
    pub average_grade: String,
    pub mandatory_hours_pct: String,
    pub complementary_hours_pct: String,
    pub registration_book: String,
    /// Display date, dd/mm/YYYY.
    pub issue_date: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

/// Field-level patch for a profile row. `None` means "leave the stored value
/// alone" — in particular an omitted `diploma_url` must never null out the
/// previously stored URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    pub full_name: Option<String>,
    pub course_name: Option<String>,
    pub registration_number: Option<String>,
    pub diploma_url: Option<String>,
    pub enrollment_status: Option<EnrollmentStatus>,
    pub academic_period: Option<String>,
    pub average_grade: Option<String>,
    pub mandatory_hours_pct: Option<String>,
    pub complementary_hours_pct: Option<String>,
    pub registration_book: Option<String>,
    pub issue_date: Option<String>,
}

impl StudentPatch {
    /// Applies the patch in memory. The SQL side mirrors this with COALESCE;
    /// both must agree on the non-destructive semantics.
    pub fn apply(&self, profile: &mut StudentProfile) {
        fn set(target: &mut String, source: &Option<String>) {
            if let Some(v) = source {
                *target = v.clone();
            }
        }

        set(&mut profile.full_name, &self.full_name);
        set(&mut profile.course_name, &self.course_name);
        set(&mut profile.registration_number, &self.registration_number);
        set(&mut profile.diploma_url, &self.diploma_url);
        if let Some(status) = self.enrollment_status {
            profile.enrollment_status = status;
        }
        set(&mut profile.academic_period, &self.academic_period);
        set(&mut profile.average_grade, &self.average_grade);
        set(&mut profile.mandatory_hours_pct, &self.mandatory_hours_pct);
        set(
            &mut profile.complementary_hours_pct,
            &self.complementary_hours_pct,
        );
        set(&mut profile.registration_book, &self.registration_book);
        set(&mut profile.issue_date, &self.issue_date);
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.course_name.is_none()
            && self.registration_number.is_none()
            && self.diploma_url.is_none()
            && self.enrollment_status.is_none()
            && self.academic_period.is_none()
            && self.average_grade.is_none()
            && self.mandatory_hours_pct.is_none()
            && self.complementary_hours_pct.is_none()
            && self.registration_book.is_none()
            && self.issue_date.is_none()
    }
}

// ---------------------------------------------------------------------------
// Issuance defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_ACADEMIC_PERIOD: &str = "2023.2";
pub const DEFAULT_AVERAGE_GRADE: &str = "8.75";
pub const DEFAULT_HOURS_PCT: &str = "100%";

/// Default registration-book label, e.g. `LB-2026/041`.
pub fn default_registration_book(now: DateTime<Utc>) -> String {
    let book_id: u32 = rand::thread_rng().gen_range(0..1000);
    format!("LB-{}/{:03}", now.format("%Y"), book_id)
}

/// Current date formatted day/month/year for the diploma face.
pub fn default_issue_date(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> StudentProfile {
        StudentProfile {
            id: Uuid::new_v4(),
            full_name: "Ana Silva".to_string(),
            course_name: "Direito".to_string(),
            registration_number: "2020123456".to_string(),
            diploma_url: "https://files.example/diploma.pdf".to_string(),
            validation_code: "ABC123".to_string(),
            enrollment_status: EnrollmentStatus::Concluido,
            academic_period: DEFAULT_ACADEMIC_PERIOD.to_string(),
            average_grade: DEFAULT_AVERAGE_GRADE.to_string(),
            mandatory_hours_pct: DEFAULT_HOURS_PCT.to_string(),
            complementary_hours_pct: DEFAULT_HOURS_PCT.to_string(),
            registration_book: "LB-2024/001".to_string(),
            issue_date: "01/12/2024".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn patch_with_omitted_diploma_url_preserves_stored_value() {
        let mut profile = sample_profile();
        let stored_url = profile.diploma_url.clone();

        let patch = StudentPatch {
            full_name: Some("Ana Maria Silva".to_string()),
            ..Default::default()
        };
        patch.apply(&mut profile);

        assert_eq!(profile.full_name, "Ana Maria Silva");
        assert_eq!(profile.diploma_url, stored_url);
    }

    #[test]
    fn patch_with_supplied_diploma_url_overwrites() {
        let mut profile = sample_profile();

        let patch = StudentPatch {
            diploma_url: Some("https://files.example/v2.pdf".to_string()),
            ..Default::default()
        };
        patch.apply(&mut profile);

        assert_eq!(profile.diploma_url, "https://files.example/v2.pdf");
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut profile = sample_profile();
        let before = format!("{profile:?}");

        let patch = StudentPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut profile);

        assert_eq!(before, format!("{profile:?}"));
    }

    #[test]
    fn enrollment_status_round_trips_through_text() {
        for status in [
            EnrollmentStatus::Concluido,
            EnrollmentStatus::Cursando,
            EnrollmentStatus::Trancado,
            EnrollmentStatus::Cancelado,
        ] {
            let text = status.to_string();
            assert_eq!(EnrollmentStatus::try_from(text), Ok(status));
        }
        assert!(EnrollmentStatus::try_from("FORMADO".to_string()).is_err());
    }

    #[test]
    fn enrollment_status_serializes_as_portuguese_label() {
        let json = serde_json::to_string(&EnrollmentStatus::Concluido).unwrap();
        assert_eq!(json, "\"CONCLUÍDO\"");
    }

    #[test]
    fn default_issue_date_is_day_month_year() {
        let date = chrono::DateTime::parse_from_rfc3339("2024-12-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(default_issue_date(date), "01/12/2024");
    }

    #[test]
    fn default_registration_book_carries_year_prefix() {
        let date = chrono::DateTime::parse_from_rfc3339("2024-12-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let book = default_registration_book(date);
        assert!(book.starts_with("LB-2024/"), "got {book}");
    }
}
