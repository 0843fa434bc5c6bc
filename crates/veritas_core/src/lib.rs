pub mod backend;
pub mod error;
pub mod models;

pub use error::{Error, Result};

use uuid::Uuid;

/// Generates a fresh validation code for a diploma when the caller did not
/// supply one. UUIDv4, same namespace the public lookup resolves document ids
/// in, so a single code field serves both record kinds.
pub fn generate_validation_code() -> String {
    Uuid::new_v4().to_string()
}
