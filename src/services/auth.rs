//! Permission checks for the administration pages.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::domain::types::UserId;
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageUsers,
    ManageSettings,
}

pub trait Authorizer {
    fn authorize(&self, user: &AuthenticatedUser, permission: Permission) -> bool;
}

/// Grants every permission to holders of the administrator role.
#[derive(Debug, Clone)]
pub struct RoleAuthorizer {
    admin_role: String,
}

impl RoleAuthorizer {
    pub fn new(admin_role: impl Into<String>) -> Self {
        Self {
            admin_role: admin_role.into(),
        }
    }
}

impl Authorizer for RoleAuthorizer {
    fn authorize(&self, user: &AuthenticatedUser, _permission: Permission) -> bool {
        check_role(&self.admin_role, &user.roles)
    }
}

/// Account id of the principal; `None` when `sub` is not a positive integer.
pub fn principal_id(user: &AuthenticatedUser) -> Option<UserId> {
    user.sub.parse::<i32>().ok().and_then(|id| UserId::new(id).ok())
}

pub fn ensure_permission(
    authorizer: &dyn Authorizer,
    user: &AuthenticatedUser,
    permission: Permission,
) -> ServiceResult<()> {
    if authorizer.authorize(user, permission) {
        Ok(())
    } else {
        log::warn!("User {} lacks permission {permission:?}", user.sub);
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{ADMIN_ROLE, admin, principal, viewer};

    #[test]
    fn admin_role_grants_every_permission() {
        let authorizer = RoleAuthorizer::new(ADMIN_ROLE);
        assert!(ensure_permission(&authorizer, &admin(), Permission::ManageUsers).is_ok());
        assert!(ensure_permission(&authorizer, &admin(), Permission::ManageSettings).is_ok());
    }

    #[test]
    fn other_roles_are_rejected() {
        let authorizer = RoleAuthorizer::new(ADMIN_ROLE);
        assert!(matches!(
            ensure_permission(&authorizer, &viewer(), Permission::ManageUsers),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn principal_id_parses_numeric_subject() {
        assert_eq!(principal_id(&admin()).map(UserId::get), Some(1));
        assert_eq!(principal_id(&principal("someone", &[])), None);
        assert_eq!(principal_id(&principal("0", &[])), None);
    }
}
