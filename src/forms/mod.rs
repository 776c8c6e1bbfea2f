//! Form definitions backing the administration routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod settings;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid user name")]
    InvalidUserName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid site name")]
    InvalidSiteName,

    #[error("invalid page size")]
    InvalidPageSize,
}
