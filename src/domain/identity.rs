//! Results reported by the identity manager.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Machine-readable reason of an identity operation failure.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum IdentityErrorCode {
    CannotDeleteSelf,
    LastAdministrator,
    StoreFailure,
}

impl Display for IdentityErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            IdentityErrorCode::CannotDeleteSelf => "CannotDeleteSelf",
            IdentityErrorCode::LastAdministrator => "LastAdministrator",
            IdentityErrorCode::StoreFailure => "StoreFailure",
        };
        f.write_str(code)
    }
}

/// Single failure reported by the identity manager. `description` is a
/// message catalog key.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct IdentityError {
    pub code: IdentityErrorCode,
    pub description: String,
}

impl IdentityError {
    pub fn new(code: IdentityErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

/// Outcome of an identity operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityResult {
    pub errors: Vec<IdentityError>,
}

impl IdentityResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failed(errors: Vec<IdentityError>) -> Self {
        Self { errors }
    }

    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}
