use serde::Serialize;

use crate::domain::types::{PageSize, SiteName};

/// Default page size used when the settings row is missing.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default site name used when the settings row is missing.
pub const DEFAULT_SITE_NAME: &str = "Pushkind";

/// Site-wide settings shared by every administration page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SiteSettings {
    pub site_name: SiteName,
    pub page_size: PageSize,
}
