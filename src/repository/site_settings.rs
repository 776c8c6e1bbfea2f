//! Repository implementation for the site settings row.

use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::site_settings::{DEFAULT_PAGE_SIZE, DEFAULT_SITE_NAME, SiteSettings};
use crate::domain::types::{PageSize, SiteName};
use crate::models::site_settings::{SITE_SETTINGS_ID, SiteSettings as DbSiteSettings};
use crate::repository::{DieselRepository, SiteSettingsReader, SiteSettingsWriter};
use crate::schema::site_settings;

impl SiteSettingsReader for DieselRepository {
    fn get_site_settings(&self) -> RepositoryResult<SiteSettings> {
        let mut conn = self.conn()?;

        let db_settings = site_settings::table
            .find(SITE_SETTINGS_ID)
            .select(DbSiteSettings::as_select())
            .first::<DbSiteSettings>(&mut conn)
            .optional()?;

        match db_settings {
            Some(db_settings) => SiteSettings::try_from(db_settings).map_err(RepositoryError::from),
            None => {
                log::warn!("Site settings row is missing, using defaults");
                Ok(SiteSettings {
                    site_name: SiteName::new(DEFAULT_SITE_NAME)?,
                    page_size: PageSize::new(DEFAULT_PAGE_SIZE)?,
                })
            }
        }
    }
}

impl SiteSettingsWriter for DieselRepository {
    fn save_site_settings(&self, settings: &SiteSettings) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let db_settings = DbSiteSettings::from(settings);

        diesel::insert_into(site_settings::table)
            .values(&db_settings)
            .on_conflict(site_settings::id)
            .do_update()
            .set(&db_settings)
            .execute(&mut conn)?;

        Ok(())
    }
}
