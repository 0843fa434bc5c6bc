//! HTTP client for the hosted identity provider (a GoTrue-compatible API:
//! admin user management under `/auth/v1/admin`, password sign-in and
//! token introspection under `/auth/v1`).
//!
//! Two credentials exist: the public-safe `anon_key` (sign-in, token
//! introspection) and the privileged `service_key` (account create / update /
//! delete). Provider error messages are passed through verbatim so the
//! surfaces can render them inline.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use veritas_core::backend::{AuthSession, AuthUser, IdentityProvider};
use veritas_core::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the backing service, e.g. `https://xyz.example.co`.
    pub base_url: String,
    /// Public-safe key, sent as `apikey` on end-user calls.
    pub anon_key: String,
    /// Privileged server-side key for the admin surface.
    pub service_key: String,
}

pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_key: String,
}

impl GoTrueClient {
    /// Fails fast with a configuration error when the base URL or the
    /// privileged key is unset — no admin operation may even be attempted.
    pub fn new(config: IdentityConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::Configuration(
                "identity provider base URL is not set".to_string(),
            ));
        }
        if config.service_key.trim().is_empty() {
            return Err(Error::Configuration(
                "identity provider service key is not set".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
            service_key: config.service_key,
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct UserBody {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct TokenBody {
    access_token: String,
    user: UserBody,
}

/// The provider varies its error field name between endpoints; try the known
/// spellings before falling back to the raw body.
fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        format!("identity provider returned HTTP {status}")
    } else {
        body.trim().to_string()
    }
}

async fn fail_with_body(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Error::Auth(extract_error_message(status, &body))
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn create_user(&self, email: &str, password: &str, full_name: &str) -> Result<Uuid> {
        let resp = self
            .http
            .post(self.auth_url("admin/users"))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
                "user_metadata": { "full_name": full_name },
            }))
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fail_with_body(resp).await);
        }

        let user: UserBody = resp.json().await.map_err(|e| Error::Auth(e.to_string()))?;
        Ok(user.id)
    }

    async fn update_user(&self, id: Uuid, email: &str, full_name: Option<&str>) -> Result<()> {
        let mut body = json!({ "email": email });
        if let Some(name) = full_name {
            body["user_metadata"] = json!({ "full_name": name });
        }

        let resp = self
            .http
            .put(self.auth_url(&format!("admin/users/{id}")))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fail_with_body(resp).await);
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let resp = self
            .http
            .delete(self.auth_url(&format!("admin/users/{id}")))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fail_with_body(resp).await);
        }
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let resp = self
            .http
            .post(self.auth_url("token?grant_type=password"))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fail_with_body(resp).await);
        }

        let token: TokenBody = resp.json().await.map_err(|e| Error::Auth(e.to_string()))?;
        Ok(AuthSession {
            access_token: token.access_token,
            user_id: token.user.id,
        })
    }

    async fn user_from_token(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let resp = self
            .http
            .get(self.auth_url("user"))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        // An expired or garbage token is an anonymous caller, not a failure.
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED
            || resp.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(fail_with_body(resp).await);
        }

        let user: UserBody = resp.json().await.map_err(|e| Error::Auth(e.to_string()))?;
        Ok(Some(AuthUser {
            id: user.id,
            email: user.email,
        }))
    }
}
