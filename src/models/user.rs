//! Diesel models representing user accounts and their roles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{RoleName, TypeConstraintError, UserEmail, UserId, UserName};
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub user_name: String,
    pub normalized_user_name: String,
    pub email: String,
    pub normalized_email: String,
    pub registration_status: String,
    pub email_status: String,
    pub created_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub user_name: &'a str,
    pub normalized_user_name: String,
    pub email: &'a str,
    pub normalized_email: String,
    pub registration_status: &'a str,
    pub email_status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Data used when updating a [`User`] record.
pub struct UpdateUser<'a> {
    pub user_name: &'a str,
    pub normalized_user_name: String,
    pub email: &'a str,
    pub normalized_email: String,
    pub registration_status: &'a str,
    pub email_status: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Associations, Identifiable, Insertable)]
#[diesel(primary_key(user_id, role))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::user_roles)]
/// Role granted to a user.
pub struct UserRole {
    pub user_id: i32,
    pub role: String,
}

impl TryFrom<(User, Vec<UserRole>)> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from((user, roles): (User, Vec<UserRole>)) -> Result<Self, Self::Error> {
        let roles = roles
            .into_iter()
            .map(|r| RoleName::new(r.role))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: UserId::try_from(user.id)?,
            user_name: UserName::new(user.user_name)?,
            email: UserEmail::new(user.email)?,
            registration_status: user.registration_status.parse()?,
            email_status: user.email_status.parse()?,
            roles,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            user_name: user.user_name.as_str(),
            normalized_user_name: user.user_name.normalized(),
            email: user.email.as_str(),
            normalized_email: user.email.normalized(),
            registration_status: user.registration_status.as_str(),
            email_status: user.email_status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        Self {
            user_name: user.user_name.as_str(),
            normalized_user_name: user.user_name.normalized(),
            email: user.email.as_str(),
            normalized_email: user.email.normalized(),
            registration_status: user.registration_status.as_str(),
            email_status: user.email_status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::UserStatus;

    #[test]
    fn from_domain_new_user_fills_normalized_columns() {
        let domain = DomainNewUser::new(
            UserName::new("Alice").expect("valid user name"),
            UserEmail::new("Alice@Example.com").expect("valid email"),
            UserStatus::Approved,
            UserStatus::Pending,
            vec![],
        );
        let new: NewUser = (&domain).into();
        assert_eq!(new.user_name, "Alice");
        assert_eq!(new.normalized_user_name, "alice");
        assert_eq!(new.email, "Alice@Example.com");
        assert_eq!(new.normalized_email, "alice@example.com");
        assert_eq!(new.registration_status, "Approved");
        assert_eq!(new.email_status, "Pending");
    }

    #[test]
    fn from_db_user_into_domain() {
        let db = User {
            id: 3,
            user_name: "bob".into(),
            normalized_user_name: "bob".into(),
            email: "bob@example.com".into(),
            normalized_email: "bob@example.com".into(),
            registration_status: "Pending".into(),
            email_status: "Approved".into(),
            created_at: Utc::now().naive_utc(),
            last_login_at: None,
        };
        let roles = vec![UserRole {
            user_id: 3,
            role: "admin".into(),
        }];

        let domain = DomainUser::try_from((db, roles)).expect("valid user");
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.registration_status, UserStatus::Pending);
        assert_eq!(domain.email_status, UserStatus::Approved);
        assert!(domain.has_role("admin"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let db = User {
            id: 1,
            user_name: "bob".into(),
            normalized_user_name: "bob".into(),
            email: "bob@example.com".into(),
            normalized_email: "bob@example.com".into(),
            registration_status: "Banned".into(),
            email_status: "Approved".into(),
            created_at: Utc::now().naive_utc(),
            last_login_at: None,
        };

        assert!(DomainUser::try_from((db, Vec::new())).is_err());
    }
}
