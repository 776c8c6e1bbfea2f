//! Message catalog used for notifications, validation messages and templates.

use std::collections::HashMap;
use std::sync::Arc;

use config::{Config, ConfigError, File};
use tera::{Tera, Value};

/// English messages for every key used by the service. Locale files override
/// them; unknown keys render as the key itself.
const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("user_created", "User created successfully"),
    ("user_updated", "User updated successfully"),
    ("user_deleted", "User deleted successfully"),
    ("user_delete_failed", "Could not delete the user"),
    ("cannot_delete_self", "You cannot delete your own account"),
    ("last_administrator", "The last administrator cannot be deleted"),
    ("store_failure", "The user could not be removed from the store"),
    ("user_name_required", "User name is required"),
    ("user_name_invalid", "User name may only contain letters, digits and -._@+"),
    ("user_name_taken", "User name is already taken"),
    ("email_invalid", "Invalid email address"),
    ("email_taken", "Email is already in use"),
    ("settings_saved", "Settings saved"),
    ("settings_save_failed", "Could not save the settings"),
    ("settings_invalid", "Site name is required and page size must be between 1 and 100"),
    ("users_title", "Users"),
    ("settings_title", "Settings"),
    ("add_user", "Add user"),
    ("edit_user", "Edit user"),
    ("search", "Search"),
    ("apply", "Apply"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("edit", "Edit"),
    ("delete", "Delete"),
    ("no_users", "No users found"),
    ("total", "Total"),
    ("user_name", "User name"),
    ("email", "Email"),
    ("roles", "Roles"),
    ("created", "Created"),
    ("last_login", "Last login"),
    ("registration_approved", "Registration approved"),
    ("email_confirmed", "Email confirmed"),
    ("site_name", "Site name"),
    ("page_size", "Page size"),
    ("filter_all", "All"),
    ("filter_approved", "Approved"),
    ("filter_pending", "Pending approval"),
    ("filter_emailpending", "Email not confirmed"),
    ("order_none", "Default order"),
    ("order_name", "Name"),
    ("order_email", "Email"),
    ("order_createdutc", "Created"),
    ("order_lastloginutc", "Last login"),
];

#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new("en")
    }
}

impl MessageCatalog {
    /// Catalog holding only the built-in English messages.
    pub fn new(locale: impl Into<String>) -> Self {
        let messages = DEFAULT_MESSAGES
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            locale: locale.into(),
            messages,
        }
    }

    /// Loads `{dir}/{locale}.yaml` (a flat map of lowercase keys to messages)
    /// on top of the built-in messages. A missing file is not an error.
    pub fn load(dir: &str, locale: &str) -> Result<Self, ConfigError> {
        let overrides = Config::builder()
            .add_source(File::with_name(&format!("{dir}/{locale}")).required(false))
            .build()?
            .try_deserialize::<HashMap<String, String>>()?;

        let mut catalog = Self::new(locale);
        catalog.extend(overrides);
        Ok(catalog)
    }

    pub fn extend(&mut self, messages: HashMap<String, String>) {
        self.messages.extend(messages);
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Localized message for `key`, or the key itself when unknown.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Registers the `t(key="...")` template function.
    pub fn register(self: &Arc<Self>, tera: &mut Tera) {
        let catalog = Arc::clone(self);
        tera.register_function("t", move |args: &HashMap<String, Value>| {
            let key = args
                .get("key")
                .and_then(Value::as_str)
                .ok_or_else(|| tera::Error::msg("t() requires a string `key` argument"))?;
            Ok(Value::String(catalog.t(key).to_string()))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_key() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.t("user_created"), "User created successfully");
        assert_eq!(catalog.t("Some unknown error"), "Some unknown error");
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut catalog = MessageCatalog::new("ru");
        catalog.extend(HashMap::from([(
            "user_created".to_string(),
            "Пользователь создан".to_string(),
        )]));
        assert_eq!(catalog.locale(), "ru");
        assert_eq!(catalog.t("user_created"), "Пользователь создан");
        assert_eq!(catalog.t("user_deleted"), "User deleted successfully");
    }

    #[test]
    fn load_without_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = MessageCatalog::load(dir.path().to_str().expect("utf-8 path"), "de")
            .expect("missing file is fine");
        assert_eq!(catalog.t("user_updated"), "User updated successfully");
    }

    #[test]
    fn load_reads_locale_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("ru.yaml"), "user_deleted: Пользователь удалён\n")
            .expect("write locale file");

        let catalog = MessageCatalog::load(dir.path().to_str().expect("utf-8 path"), "ru")
            .expect("locale file loads");
        assert_eq!(catalog.t("user_deleted"), "Пользователь удалён");
    }

    #[test]
    fn template_function_translates() {
        let catalog = Arc::new(MessageCatalog::default());
        let mut tera = Tera::default();
        catalog.register(&mut tera);
        tera.add_raw_template("page.txt", "{{ t(key='user_deleted') }}")
            .expect("template parses");

        let rendered = tera
            .render("page.txt", &tera::Context::new())
            .expect("template renders");
        assert_eq!(rendered, "User deleted successfully");
    }
}
