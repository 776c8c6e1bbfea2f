//! Database and configuration models of the user administration service.

pub mod config;
pub mod site_settings;
pub mod user;
