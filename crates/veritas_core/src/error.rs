use thiserror::Error;

/// Error taxonomy for every service operation.
///
/// Upstream provider messages (`Auth`, `Store`) are passed through verbatim so
/// the caller can render them inline; nothing is thrown across the service
/// boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Identity-provider call failed (bad credentials, duplicate email, ...).
    #[error("{0}")]
    Auth(String),

    /// Data-store insert/update/delete/select failed.
    #[error("{0}")]
    Store(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A lookup code matched neither record kind.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Malformed request (missing upload field, bad payload).
    #[error("{0}")]
    Invalid(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

pub type Result<T> = std::result::Result<T, Error>;
