//! Identity manager: lookups and guarded deletion of user accounts.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::identity::{IdentityError, IdentityErrorCode, IdentityResult};
use crate::domain::types::{RoleName, UserId};
use crate::domain::user::User;
use crate::repository::session::{PendingWrite, UserSession};
use crate::repository::{UserReader, UserWriter};
use crate::services::auth::principal_id;
use crate::services::{ServiceError, ServiceResult};

pub struct UserManager<'a, R: ?Sized> {
    repo: &'a R,
    admin_role: &'a RoleName,
}

impl<'a, R> UserManager<'a, R>
where
    R: UserReader + UserWriter + ?Sized,
{
    pub fn new(repo: &'a R, admin_role: &'a RoleName) -> Self {
        Self { repo, admin_role }
    }

    pub fn find_by_id(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user_by_id(id)
            .map_err(|err| {
                log::error!("Failed to load user {id}: {err}");
                err
            })?
            .ok_or(ServiceError::NotFound)
    }

    /// Deletes `user` through `session`. Rule violations and store failures
    /// are reported in the returned [`IdentityResult`]; only failures to read
    /// the store are errors.
    pub fn delete(
        &self,
        session: &mut UserSession<'_, R>,
        actor: &AuthenticatedUser,
        user: &User,
    ) -> ServiceResult<IdentityResult> {
        let mut errors = Vec::new();

        if principal_id(actor) == Some(user.id) {
            errors.push(IdentityError::new(
                IdentityErrorCode::CannotDeleteSelf,
                "cannot_delete_self",
            ));
        }

        let is_admin = user.has_role(self.admin_role);
        if is_admin && self.repo.count_users_in_role(self.admin_role)? <= 1 {
            errors.push(last_administrator());
        }

        if !errors.is_empty() {
            return Ok(IdentityResult::failed(errors));
        }

        session.stage(PendingWrite::Delete(user.id));
        if is_admin {
            // Recounted inside the commit transaction.
            session.stage(PendingWrite::EnsureRoleHolder(self.admin_role.clone()));
        }
        match session.commit() {
            Ok(_) => {
                log::info!("User {} deleted by {}", user.id, actor.sub);
                Ok(IdentityResult::success())
            }
            Err(RepositoryError::ConstraintViolation(reason)) if is_admin => {
                log::warn!("Refused to delete user {}: {reason}", user.id);
                Ok(IdentityResult::failed(vec![last_administrator()]))
            }
            Err(err) => {
                log::error!("Failed to delete user {}: {err}", user.id);
                Ok(IdentityResult::failed(vec![IdentityError::new(
                    IdentityErrorCode::StoreFailure,
                    "store_failure",
                )]))
            }
        }
    }
}

fn last_administrator() -> IdentityError {
    IdentityError::new(IdentityErrorCode::LastAdministrator, "last_administrator")
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{ADMIN_ROLE, admin, user};

    fn admin_role() -> RoleName {
        RoleName::new(ADMIN_ROLE).expect("valid role")
    }

    #[test]
    fn find_by_id_reports_missing_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));
        let role = admin_role();
        let manager = UserManager::new(&repo, &role);

        let result = manager.find_by_id(UserId::new(5).expect("valid id"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn refuses_to_delete_own_account() {
        let mut repo = MockRepository::new();
        repo.expect_apply_user_writes().times(0);
        let role = admin_role();
        let manager = UserManager::new(&repo, &role);
        let mut session = UserSession::new(&repo);

        let result = manager
            .delete(&mut session, &admin(), &user(1, "admin", &[]))
            .expect("rules evaluated");

        assert!(!result.succeeded());
        assert_eq!(result.errors[0].code, IdentityErrorCode::CannotDeleteSelf);
        assert!(session.pending().is_empty());
    }

    #[test]
    fn refuses_to_delete_last_administrator() {
        let mut repo = MockRepository::new();
        repo.expect_count_users_in_role().returning(|_| Ok(1));
        repo.expect_apply_user_writes().times(0);
        let role = admin_role();
        let manager = UserManager::new(&repo, &role);
        let mut session = UserSession::new(&repo);

        let result = manager
            .delete(&mut session, &admin(), &user(9, "boss", &[ADMIN_ROLE]))
            .expect("rules evaluated");

        assert_eq!(
            result.errors,
            vec![IdentityError::new(
                IdentityErrorCode::LastAdministrator,
                "last_administrator"
            )]
        );
    }

    #[test]
    fn commits_the_delete() {
        let mut repo = MockRepository::new();
        repo.expect_apply_user_writes()
            .withf(|writes| {
                writes.len() == 1
                    && writes[0] == PendingWrite::Delete(UserId::new(9).expect("valid id"))
            })
            .times(1)
            .returning(|_| Ok(1));
        let role = admin_role();
        let manager = UserManager::new(&repo, &role);
        let mut session = UserSession::new(&repo);

        let result = manager
            .delete(&mut session, &admin(), &user(9, "bob", &[]))
            .expect("rules evaluated");

        assert!(result.succeeded());
    }

    #[test]
    fn store_failure_is_reported_as_identity_error() {
        let mut repo = MockRepository::new();
        repo.expect_apply_user_writes()
            .returning(|_| Err(RepositoryError::DatabaseError("disk I/O error".to_string())));
        let role = admin_role();
        let manager = UserManager::new(&repo, &role);
        let mut session = UserSession::new(&repo);

        let result = manager
            .delete(&mut session, &admin(), &user(9, "bob", &[]))
            .expect("rules evaluated");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, IdentityErrorCode::StoreFailure);
    }

    #[test]
    fn deleting_an_administrator_rechecks_the_role_on_commit() {
        let mut repo = MockRepository::new();
        repo.expect_count_users_in_role().returning(|_| Ok(2));
        repo.expect_apply_user_writes()
            .withf(|writes| {
                matches!(
                    writes,
                    [PendingWrite::Delete(id), PendingWrite::EnsureRoleHolder(role)]
                        if id.get() == 9 && role.as_str() == ADMIN_ROLE
                )
            })
            .times(1)
            .returning(|_| {
                Err(RepositoryError::ConstraintViolation(
                    "No user left in role users_admin".to_string(),
                ))
            });
        let role = admin_role();
        let manager = UserManager::new(&repo, &role);
        let mut session = UserSession::new(&repo);

        let result = manager
            .delete(&mut session, &admin(), &user(9, "boss", &[ADMIN_ROLE]))
            .expect("rules evaluated");

        assert_eq!(result.errors, vec![last_administrator()]);
    }
}
