//! Mock repository implementations for isolating services in tests.

use mockall::mock;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::site_settings::SiteSettings;
use crate::domain::types::{RoleName, UserId};
use crate::domain::user::User;
use crate::repository::session::PendingWrite;
use crate::repository::{
    SiteSettingsReader, SiteSettingsWriter, UserListQuery, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_normalized_user_name(&self, name: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_normalized_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
        fn count_users_in_role(&self, role: &RoleName) -> RepositoryResult<usize>;
    }

    impl UserWriter for Repository {
        fn apply_user_writes(&self, writes: &[PendingWrite]) -> RepositoryResult<usize>;
    }

    impl SiteSettingsReader for Repository {
        fn get_site_settings(&self) -> RepositoryResult<SiteSettings>;
    }

    impl SiteSettingsWriter for Repository {
        fn save_site_settings(&self, settings: &SiteSettings) -> RepositoryResult<()>;
    }
}
