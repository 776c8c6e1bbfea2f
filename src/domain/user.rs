use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    RoleName, TypeConstraintError, UserEmail, UserId, UserName, UserStatus,
};

/// User account managed by the administration pages.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub user_name: UserName,
    pub email: UserEmail,
    pub registration_status: UserStatus,
    pub email_status: UserStatus,
    pub roles: Vec<RoleName>,
    pub created_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

impl User {
    pub fn normalized_user_name(&self) -> String {
        self.user_name.normalized()
    }

    pub fn normalized_email(&self) -> String {
        self.email.normalized()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == role)
    }
}

/// Values required to insert a new user.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: UserEmail,
    pub registration_status: UserStatus,
    pub email_status: UserStatus,
    pub roles: Vec<RoleName>,
}

impl NewUser {
    #[must_use]
    pub fn new(
        user_name: UserName,
        email: UserEmail,
        registration_status: UserStatus,
        email_status: UserStatus,
        roles: Vec<RoleName>,
    ) -> Self {
        Self {
            user_name,
            email,
            registration_status,
            email_status,
            roles: dedup_roles(roles),
        }
    }
}

/// Replacement values for an existing user.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateUser {
    pub user_name: UserName,
    pub email: UserEmail,
    pub registration_status: UserStatus,
    pub email_status: UserStatus,
    pub roles: Vec<RoleName>,
}

impl UpdateUser {
    #[must_use]
    pub fn new(
        user_name: UserName,
        email: UserEmail,
        registration_status: UserStatus,
        email_status: UserStatus,
        roles: Vec<RoleName>,
    ) -> Self {
        Self {
            user_name,
            email,
            registration_status,
            email_status,
            roles: dedup_roles(roles),
        }
    }
}

/// Status filter offered by the user list.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UsersFilter {
    #[default]
    All,
    Approved,
    Pending,
    EmailPending,
}

/// Sort orders offered by the user list.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum UsersOrder {
    Name,
    Email,
    CreatedUtc,
    LastLoginUtc,
}

impl UsersFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            UsersFilter::All => "All",
            UsersFilter::Approved => "Approved",
            UsersFilter::Pending => "Pending",
            UsersFilter::EmailPending => "EmailPending",
        }
    }
}

impl FromStr for UsersFilter {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(UsersFilter::All),
            "Approved" => Ok(UsersFilter::Approved),
            "Pending" => Ok(UsersFilter::Pending),
            "EmailPending" => Ok(UsersFilter::EmailPending),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown users filter: {other}"
            ))),
        }
    }
}

impl UsersOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            UsersOrder::Name => "Name",
            UsersOrder::Email => "Email",
            UsersOrder::CreatedUtc => "CreatedUtc",
            UsersOrder::LastLoginUtc => "LastLoginUtc",
        }
    }
}

impl FromStr for UsersOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Name" => Ok(UsersOrder::Name),
            "Email" => Ok(UsersOrder::Email),
            "CreatedUtc" => Ok(UsersOrder::CreatedUtc),
            "LastLoginUtc" => Ok(UsersOrder::LastLoginUtc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown users order: {other}"
            ))),
        }
    }
}

fn dedup_roles(mut roles: Vec<RoleName>) -> Vec<RoleName> {
    roles.sort_unstable();
    roles.dedup();
    roles
}
