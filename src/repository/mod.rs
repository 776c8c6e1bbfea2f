use pushkind_common::repository::errors::RepositoryResult;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::site_settings::SiteSettings;
use crate::domain::types::{RoleName, UserId};
use crate::domain::user::{User, UsersFilter, UsersOrder};
use crate::repository::session::PendingWrite;

#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod session;
pub mod site_settings;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Rows to skip and take when loading a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub filter: UsersFilter,
    /// Case-sensitive substring matched against the normalized user name or email.
    pub search: Option<String>,
    pub order: Option<UsersOrder>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: UsersFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Blank search strings are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    pub fn order(mut self, order: UsersOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn paginate(mut self, offset: usize, limit: usize) -> Self {
        self.pagination = Some(Pagination { offset, limit });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_normalized_user_name(&self, name: &str) -> RepositoryResult<Option<User>>;
    fn get_user_by_normalized_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    /// Returns the total number of matches and the requested page.
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    fn count_users_in_role(&self, role: &RoleName) -> RepositoryResult<usize>;
}

pub trait UserWriter {
    /// Applies the staged writes atomically, returning the number of affected users.
    fn apply_user_writes(&self, writes: &[PendingWrite]) -> RepositoryResult<usize>;
}

pub trait SiteSettingsReader {
    fn get_site_settings(&self) -> RepositoryResult<SiteSettings>;
}

pub trait SiteSettingsWriter {
    fn save_site_settings(&self, settings: &SiteSettings) -> RepositoryResult<()>;
}
