//! DTO modules that bridge services with templates.

pub mod settings;
pub mod users;
