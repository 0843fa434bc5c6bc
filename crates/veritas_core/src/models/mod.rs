pub mod document;
pub mod settings;
pub mod student;
pub mod verification;

pub use document::DocumentRecord;
pub use settings::{SettingsPatch, SiteSettings, SETTINGS_ROW_ID};
pub use student::{EnrollmentStatus, StudentPatch, StudentProfile};
pub use verification::{verify_url, NormalizedRecord};
