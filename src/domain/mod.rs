//! Domain aggregates exposed by the user administration service layer.

pub mod identity;
pub mod site_settings;
pub mod types;
pub mod user;
