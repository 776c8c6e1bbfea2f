//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_locale() -> String {
    "en".to_string()
}

fn default_admin_role() -> String {
    "users_admin".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub locales_dir: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Role granting the user and settings administration permissions.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}
