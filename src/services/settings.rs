//! Services reading and saving the site settings.

use crate::domain::site_settings::SiteSettings;
use crate::dto::settings::SettingsPageData;
use crate::forms::settings::SettingsForm;
use crate::repository::{SiteSettingsReader, SiteSettingsWriter};
use crate::services::auth::{Permission, ensure_permission};
use crate::services::{RequestContext, ServiceError, ServiceResult};

pub fn load_settings<R>(repo: &R, ctx: &RequestContext<'_>) -> ServiceResult<SettingsPageData>
where
    R: SiteSettingsReader + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageSettings)?;

    let settings = repo.get_site_settings().map_err(|err| {
        log::error!("Failed to load site settings: {err}");
        err
    })?;

    Ok(SettingsPageData { settings })
}

/// Validates and stores the submitted settings. An invalid form is reported
/// as [`ServiceError::Form`] carrying a message catalog key.
pub fn save_settings<R>(repo: &R, ctx: &RequestContext<'_>, form: SettingsForm) -> ServiceResult<()>
where
    R: SiteSettingsWriter + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageSettings)?;

    let settings = SiteSettings::try_from(form).map_err(|err| {
        log::warn!("Rejected site settings: {err}");
        ServiceError::Form("settings_invalid".to_string())
    })?;

    repo.save_site_settings(&settings).map_err(|err| {
        log::error!("Failed to save site settings: {err}");
        err
    })?;

    ctx.notifier.success(ctx.catalog.t("settings_saved"));
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{Fixture, Note, admin, viewer};

    #[test]
    fn viewer_cannot_save_settings() {
        let mut repo = MockRepository::new();
        repo.expect_save_site_settings().times(0);
        let fixture = Fixture::new(viewer());

        let result = save_settings(
            &repo,
            &fixture.ctx(),
            SettingsForm {
                site_name: "Site".to_string(),
                page_size: 20,
            },
        );

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn invalid_settings_are_not_saved() {
        let mut repo = MockRepository::new();
        repo.expect_save_site_settings().times(0);
        let fixture = Fixture::new(admin());

        let result = save_settings(
            &repo,
            &fixture.ctx(),
            SettingsForm {
                site_name: String::new(),
                page_size: 20,
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(key)) if key == "settings_invalid"));
    }

    #[test]
    fn valid_settings_are_saved() {
        let mut repo = MockRepository::new();
        repo.expect_save_site_settings()
            .withf(|settings| settings.page_size.get() == 20 && settings.site_name.as_str() == "Site")
            .times(1)
            .returning(|_| Ok(()));
        let fixture = Fixture::new(admin());

        save_settings(
            &repo,
            &fixture.ctx(),
            SettingsForm {
                site_name: "Site".to_string(),
                page_size: 20,
            },
        )
        .expect("settings saved");

        assert_eq!(
            fixture.notifier.notes(),
            vec![Note::Success("Settings saved".to_string())]
        );
    }
}
