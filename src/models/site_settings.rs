//! Diesel model for the single-row site settings table.

use diesel::prelude::*;

use crate::domain::site_settings::SiteSettings as DomainSiteSettings;
use crate::domain::types::{PageSize, SiteName, TypeConstraintError};

/// Primary key of the only settings row.
pub const SITE_SETTINGS_ID: i32 = 1;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::site_settings)]
pub struct SiteSettings {
    pub id: i32,
    pub site_name: String,
    pub page_size: i32,
}

impl TryFrom<SiteSettings> for DomainSiteSettings {
    type Error = TypeConstraintError;

    fn try_from(settings: SiteSettings) -> Result<Self, Self::Error> {
        let page_size = usize::try_from(settings.page_size)
            .map_err(|_| TypeConstraintError::InvalidValue("negative page size".to_string()))?;

        Ok(Self {
            site_name: SiteName::new(settings.site_name)?,
            page_size: PageSize::new(page_size)?,
        })
    }
}

impl From<&DomainSiteSettings> for SiteSettings {
    fn from(settings: &DomainSiteSettings) -> Self {
        Self {
            id: SITE_SETTINGS_ID,
            site_name: settings.site_name.as_str().to_string(),
            // PageSize::MAX fits into i32.
            page_size: settings.page_size.get() as i32,
        }
    }
}
