use chrono::Utc;

use veritas_core::error::Result;
use veritas_core::models::{SettingsPatch, SiteSettings};

use crate::VeritasService;

impl VeritasService {
    /// Branding for every page. A missing singleton row is an empty settings
    /// object, not an error — the pages fall back to their built-in branding.
    pub async fn get_settings(&self) -> Result<SiteSettings> {
        Ok(self.settings.get().await?.unwrap_or_default())
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<()> {
        self.settings.update(&patch).await
    }

    /// Same storage-then-URL pattern as document upload, then the URL is
    /// persisted into the singleton row.
    pub async fn upload_logo(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let key = match file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => {
                format!("logo-{}.{}", Utc::now().timestamp_millis(), ext.to_lowercase())
            }
            _ => format!("logo-{}", Utc::now().timestamp_millis()),
        };

        self.storage.upload(&key, bytes, content_type).await?;
        let url = self.storage.public_url(&key);

        self.settings
            .update(&SettingsPatch {
                logo_url: Some(url.clone()),
                institution_name: None,
            })
            .await?;

        tracing::info!(%url, "logo updated");
        Ok(url)
    }
}
