//! HTTP handlers and the helpers they share.

use std::sync::Arc;

use actix_web::HttpResponse;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::display::DisplayManager;
use crate::domain::types::RoleName;
use crate::i18n::MessageCatalog;
use crate::notify::Notifier;
use crate::services::auth::RoleAuthorizer;
use crate::services::{RequestContext, ServiceError};

pub mod settings;
pub mod users;

/// Application-wide collaborators shared by every handler.
pub struct AppState {
    pub display: DisplayManager,
    pub authorizer: RoleAuthorizer,
    pub catalog: Arc<MessageCatalog>,
    pub admin_role: RoleName,
}

impl AppState {
    pub fn context<'a>(
        &'a self,
        user: &'a AuthenticatedUser,
        notifier: &'a dyn Notifier,
    ) -> RequestContext<'a> {
        RequestContext {
            user,
            authorizer: &self.authorizer,
            display: &self.display,
            notifier,
            catalog: &self.catalog,
            admin_role: &self.admin_role,
        }
    }
}

/// Status response for errors that have no page of their own.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

