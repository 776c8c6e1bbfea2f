//! Request-scoped unit of work over the user store.
//!
//! Handlers stage writes while they validate a request and either commit them
//! in one transaction or cancel them. Nothing reaches the database before
//! [`UserSession::commit`].

use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::types::{RoleName, UserId};
use crate::domain::user::{NewUser, UpdateUser};
use crate::repository::UserWriter;

/// Write waiting for the session to be committed.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingWrite {
    Create(NewUser),
    Update(UserId, UpdateUser),
    Delete(UserId),
    /// Fails the commit when no user holds the role once the writes staged
    /// before it have been applied.
    EnsureRoleHolder(RoleName),
}

pub struct UserSession<'a, R: UserWriter + ?Sized> {
    repo: &'a R,
    pending: Vec<PendingWrite>,
}

impl<'a, R: UserWriter + ?Sized> UserSession<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            pending: Vec::new(),
        }
    }

    pub fn stage(&mut self, write: PendingWrite) {
        self.pending.push(write);
    }

    /// Discards every staged write.
    pub fn cancel(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} staged user writes", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn pending(&self) -> &[PendingWrite] {
        &self.pending
    }

    /// Applies and drains the staged writes. Committing an empty session is a
    /// no-op. A failed commit leaves nothing behind in the store.
    pub fn commit(&mut self) -> RepositoryResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let writes = std::mem::take(&mut self.pending);
        self.repo.apply_user_writes(&writes)
    }
}
