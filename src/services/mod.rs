//! Business workflows behind the HTTP routes.
//!
//! Every service receives the acting principal and its collaborators through
//! a [`RequestContext`] and returns a [`ServiceResult`]; routes translate the
//! result into redirects, rendered pages or status codes.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::display::{DisplayError, DisplayManager};
use crate::domain::types::RoleName;
use crate::i18n::MessageCatalog;
use crate::notify::Notifier;
use crate::services::auth::Authorizer;

pub mod auth;
pub mod identity;
pub mod settings;
pub mod users;

/// Variants of the shared `pushkind_common` service error plus display
/// failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Display(#[from] DisplayError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Collaborators of one request.
pub struct RequestContext<'a> {
    pub user: &'a AuthenticatedUser,
    pub authorizer: &'a dyn Authorizer,
    pub display: &'a DisplayManager,
    pub notifier: &'a dyn Notifier,
    pub catalog: &'a MessageCatalog,
    /// Role whose last holder cannot be deleted.
    pub admin_role: &'a RoleName,
}
