use serde::Serialize;

use crate::domain::site_settings::SiteSettings;

/// Data required to render the settings page.
#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub settings: SiteSettings,
}
