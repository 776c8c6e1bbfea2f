//! Form submitted by the user create and edit pages.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{RoleName, UserEmail, UserName, UserStatus};
use crate::forms::FormError;

/// Raw editor values. Unchecked checkboxes are absent from the body, hence
/// the defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserForm {
    #[validate(length(min = 1, message = "user_name_required"))]
    pub user_name: String,
    #[validate(email(message = "email_invalid"))]
    pub email: String,
    pub registration_approved: bool,
    pub email_confirmed: bool,
    /// Comma-separated role names.
    pub roles: String,
}

impl UserForm {
    /// Trims the free-text fields.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.user_name = self.user_name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.roles = self.roles.trim().to_string();
        self
    }
}

/// Splits a comma-separated role list, dropping blanks and duplicates.
pub fn parse_roles(roles: &str) -> Vec<RoleName> {
    let mut parsed = roles
        .split(',')
        .filter_map(|role| RoleName::new(role).ok())
        .collect::<Vec<_>>();
    parsed.sort_unstable();
    parsed.dedup();
    parsed
}

/// Validated editor values ready to become a domain write.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPayload {
    pub user_name: UserName,
    pub email: UserEmail,
    pub registration_status: UserStatus,
    pub email_status: UserStatus,
    pub roles: Vec<RoleName>,
}

impl TryFrom<UserForm> for UserPayload {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        let form = form.trimmed();
        form.validate()?;

        let user_name = UserName::new(form.user_name).map_err(|_| FormError::InvalidUserName)?;
        let email = UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;

        Ok(Self {
            user_name,
            email,
            registration_status: status(form.registration_approved),
            email_status: status(form.email_confirmed),
            roles: parse_roles(&form.roles),
        })
    }
}

fn status(approved: bool) -> UserStatus {
    if approved {
        UserStatus::Approved
    } else {
        UserStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(user_name: &str, email: &str) -> UserForm {
        UserForm {
            user_name: user_name.to_string(),
            email: email.to_string(),
            registration_approved: true,
            email_confirmed: false,
            roles: " editor, ,users_admin,editor ".to_string(),
        }
    }

    #[test]
    fn payload_from_valid_form() {
        let payload = UserPayload::try_from(form(" alice ", "Alice@Example.com"))
            .expect("valid form");

        assert_eq!(payload.user_name.as_str(), "alice");
        assert_eq!(payload.email.as_str(), "Alice@Example.com");
        assert_eq!(payload.registration_status, UserStatus::Approved);
        assert_eq!(payload.email_status, UserStatus::Pending);
        let roles: Vec<&str> = payload.roles.iter().map(|r| r.as_str()).collect();
        assert_eq!(roles, vec!["editor", "users_admin"]);
    }

    #[test]
    fn payload_rejects_bad_values() {
        assert!(matches!(
            UserPayload::try_from(form("", "alice@example.com")),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            UserPayload::try_from(form("alice", "nope")),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            UserPayload::try_from(form("al ice", "alice@example.com")),
            Err(FormError::InvalidUserName)
        ));
    }

    #[test]
    fn parse_roles_ignores_blanks() {
        assert!(parse_roles(" , ,").is_empty());
    }
}
