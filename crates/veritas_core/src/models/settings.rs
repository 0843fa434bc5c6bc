use serde::{Deserialize, Serialize};

/// The singleton branding row consumed by every page (id is fixed at 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub id: i32,
    pub logo_url: Option<String>,
    pub institution_name: Option<String>,
}

pub const SETTINGS_ROW_ID: i32 = 1;

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ROW_ID,
            logo_url: None,
            institution_name: None,
        }
    }
}

/// Partial update for the settings row; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub logo_url: Option<String>,
    pub institution_name: Option<String>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut SiteSettings) {
        if let Some(url) = &self.logo_url {
            settings.logo_url = Some(url.clone());
        }
        if let Some(name) = &self.institution_name {
            settings.institution_name = Some(name.clone());
        }
    }
}
