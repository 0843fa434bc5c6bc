use std::env;

use dotenvy::dotenv;
use veritas_core::error::{Error, Result};

/// Runtime configuration, loaded once at startup.
///
/// The identity base URL and the privileged service key are hard
/// requirements: issuance, update and delete must fail immediately with a
/// configuration error when they are unset, before any side effect.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,

    pub identity_url: String,
    pub identity_anon_key: String,
    pub identity_service_key: String,

    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Base under which stored objects are publicly reachable. Defaults to
    /// the (path-style) S3 endpoint.
    pub s3_public_base: String,

    /// Base URL stamped into `/verify/{code}` links and QR payloads.
    pub public_base_url: String,

    /// Accounts allowed through the admin gate, by e-mail.
    pub admin_emails: Vec<String>,

    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        let s3_endpoint =
            env::var("S3_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
        let s3_public_base = env::var("S3_PUBLIC_BASE").unwrap_or_else(|_| s3_endpoint.clone());

        let admin_emails = env::var("ADMIN_EMAILS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if admin_emails.is_empty() {
            tracing::warn!("ADMIN_EMAILS is empty; the admin surface will reject every caller");
        }

        Ok(Config {
            database_url: required("DATABASE_URL")?,

            identity_url: required("IDENTITY_URL")?,
            identity_anon_key: env::var("IDENTITY_ANON_KEY").unwrap_or_default(),
            identity_service_key: required("IDENTITY_SERVICE_KEY")?,

            s3_endpoint,
            s3_bucket: env::var("S3_BUCKET").unwrap_or_else(|_| "documentos".to_string()),
            s3_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            s3_public_base,

            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            admin_emails,

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        })
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Configuration(format!("{key} must be set")))
}
