use serde::Deserialize;
use validator::Validate;

use crate::domain::site_settings::SiteSettings;
use crate::domain::types::{PageSize, SiteName};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsForm {
    #[validate(length(min = 1, max = 128))]
    pub site_name: String,
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
}

impl TryFrom<SettingsForm> for SiteSettings {
    type Error = FormError;

    fn try_from(form: SettingsForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(SiteSettings {
            site_name: SiteName::new(form.site_name).map_err(|_| FormError::InvalidSiteName)?,
            page_size: PageSize::new(form.page_size).map_err(|_| FormError::InvalidPageSize)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_form_to_domain() {
        let settings = SiteSettings::try_from(SettingsForm {
            site_name: " Pushkind ".to_string(),
            page_size: 25,
        })
        .expect("valid settings");

        assert_eq!(settings.site_name.as_str(), "Pushkind");
        assert_eq!(settings.page_size.get(), 25);
    }

    #[test]
    fn settings_form_rejects_blank_name_and_big_page() {
        assert!(
            SiteSettings::try_from(SettingsForm {
                site_name: "   ".to_string(),
                page_size: 10,
            })
            .is_err()
        );
        assert!(
            SiteSettings::try_from(SettingsForm {
                site_name: "Site".to_string(),
                page_size: 101,
            })
            .is_err()
        );
    }
}
