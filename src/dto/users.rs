//! View models of the user administration pages.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::display::{Displayable, Editable, ModelState, Shape};
use crate::domain::types::{UserId, UserName, UserStatus};
use crate::domain::user::{User, UsersFilter, UsersOrder};
use crate::forms::FormError;
use crate::forms::users::{UserForm, UserPayload};
use crate::pagination::{PagerParameters, RouteData};

impl Displayable for User {
    const SHAPE_TYPE: &'static str = "User";
}

/// Query string of `GET /users`. Unknown filter or order values fall back
/// to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersIndexQuery {
    pub filter: Option<String>,
    pub search: Option<String>,
    pub order: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl UsersIndexQuery {
    pub fn into_parts(self) -> (UserIndexOptions, PagerParameters) {
        let options = UserIndexOptions {
            filter: self
                .filter
                .as_deref()
                .and_then(|f| f.parse().ok())
                .unwrap_or_default(),
            search: self.search.filter(|s| !s.trim().is_empty()),
            order: self.order.as_deref().and_then(|o| o.parse().ok()),
        };
        let pager = PagerParameters {
            page: self.page,
            page_size: self.page_size,
        };
        (options, pager)
    }
}

/// Filter, search and order echoed back to the list page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UserIndexOptions {
    pub filter: UsersFilter,
    pub search: Option<String>,
    pub order: Option<UsersOrder>,
}

impl UserIndexOptions {
    /// Values carried by the pager links.
    pub fn route_data(&self) -> RouteData {
        let mut route = RouteData::new();
        route.insert("filter", self.filter.as_str());
        route.insert("search", self.search.clone().unwrap_or_default());
        route.insert("order", self.order.map(UsersOrder::as_str).unwrap_or_default());
        route
    }
}

#[derive(Debug, Serialize)]
pub struct UserEntry {
    pub user_id: UserId,
    pub shape: Shape,
}

/// Data required to render `users/index.html`.
#[derive(Debug, Serialize)]
pub struct UsersIndexViewModel {
    pub users: Vec<UserEntry>,
    pub options: UserIndexOptions,
    pub pager: Shape,
    pub total: usize,
}

/// Editor model of the create and edit pages. Holds the entered values as
/// typed so invalid submissions can be shown again.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UserEditor {
    pub id: Option<UserId>,
    pub user_name: String,
    pub email: String,
    pub registration_approved: bool,
    pub email_confirmed: bool,
    pub roles: String,
}

impl From<&User> for UserEditor {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            user_name: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            registration_approved: user.registration_status == UserStatus::Approved,
            email_confirmed: user.email_status == UserStatus::Approved,
            roles: user
                .roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl UserEditor {
    pub fn payload(&self) -> Result<UserPayload, FormError> {
        UserPayload::try_from(UserForm {
            user_name: self.user_name.clone(),
            email: self.email.clone(),
            registration_approved: self.registration_approved,
            email_confirmed: self.email_confirmed,
            roles: self.roles.clone(),
        })
    }
}

impl Displayable for UserEditor {
    const SHAPE_TYPE: &'static str = "User";
}

impl Editable for UserEditor {
    type Form = UserForm;

    fn apply_form(&mut self, form: UserForm, state: &mut ModelState) {
        let form = form.trimmed();

        if let Err(errors) = form.validate() {
            state.merge_validation(&errors);
        }
        if state.field_is_valid("user_name") && UserName::new(form.user_name.as_str()).is_err() {
            state.add_error("user_name", "user_name_invalid");
        }

        self.user_name = form.user_name;
        self.email = form.email;
        self.registration_approved = form.registration_approved;
        self.email_confirmed = form.email_confirmed;
        self.roles = form.roles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parts_fall_back_to_defaults() {
        let query = UsersIndexQuery {
            filter: Some("Bogus".to_string()),
            search: Some("   ".to_string()),
            order: Some(String::new()),
            page: Some(2),
            page_size: None,
        };

        let (options, pager) = query.into_parts();

        assert_eq!(options, UserIndexOptions::default());
        assert_eq!(pager.page, Some(2));
    }

    #[test]
    fn route_data_keeps_set_options_only() {
        let options = UserIndexOptions {
            filter: UsersFilter::EmailPending,
            search: Some("ali".to_string()),
            order: None,
        };

        let route = options.route_data();

        assert_eq!(
            route.values(),
            &[
                ("filter".to_string(), "EmailPending".to_string()),
                ("search".to_string(), "ali".to_string()),
            ]
        );
    }

    #[test]
    fn apply_form_keeps_entered_values_and_collects_errors() {
        let mut editor = UserEditor::default();
        let mut state = ModelState::new();

        editor.apply_form(
            UserForm {
                user_name: " bad name ".to_string(),
                email: "nope".to_string(),
                registration_approved: true,
                email_confirmed: false,
                roles: "editor".to_string(),
            },
            &mut state,
        );

        assert_eq!(editor.user_name, "bad name");
        assert_eq!(editor.email, "nope");
        assert!(editor.registration_approved);
        assert_eq!(
            state.errors().get("user_name"),
            Some(&vec!["user_name_invalid".to_string()])
        );
        assert_eq!(
            state.errors().get("email"),
            Some(&vec!["email_invalid".to_string()])
        );
    }

    #[test]
    fn apply_form_reports_missing_user_name() {
        let mut editor = UserEditor::default();
        let mut state = ModelState::new();

        editor.apply_form(
            UserForm {
                user_name: "   ".to_string(),
                email: "ann@example.com".to_string(),
                ..UserForm::default()
            },
            &mut state,
        );

        assert_eq!(
            state.errors().get("user_name"),
            Some(&vec!["user_name_required".to_string()])
        );
        assert!(state.field_is_valid("email"));
    }
}
