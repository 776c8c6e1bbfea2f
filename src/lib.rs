//! User administration service: lists, creates, edits and deletes the user
//! accounts of a site.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware::Compress, middleware::Logger, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use pushkind_common::models::config::CommonServerConfig;
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::{ConnectionOptions, establish_connection_pool_with};
#[cfg(feature = "server")]
use crate::display::{DisplayManager, ShapeTable};
#[cfg(feature = "server")]
use crate::domain::types::RoleName;
#[cfg(feature = "server")]
use crate::i18n::MessageCatalog;
#[cfg(feature = "server")]
use crate::middleware::BlockingPath;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::AppState;
#[cfg(feature = "server")]
use crate::routes::settings::{save_settings, show_settings};
#[cfg(feature = "server")]
use crate::routes::users::{
    create_user, delete_user, show_create_user, show_edit_user, show_index, show_users,
    update_user,
};
#[cfg(feature = "server")]
use crate::services::auth::RoleAuthorizer;

pub mod db;
#[cfg(feature = "server")]
pub mod display;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod i18n;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
#[cfg(feature = "server")]
pub mod notify;
#[cfg(feature = "server")]
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let common_config = CommonServerConfig {
        auth_service_url: server_config.auth_service_url.to_string(),
        secret: server_config.secret.clone(),
    };

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool_with(
        &server_config.database_url,
        ConnectionOptions::default(),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to establish database connection: {e}")))?;
    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let catalog = MessageCatalog::load(&server_config.locales_dir, &server_config.locale)
        .map_err(|e| std::io::Error::other(format!("Failed to load messages: {e}")))?;
    let catalog = Arc::new(catalog);

    let mut tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    catalog.register(&mut tera);

    let admin_role = RoleName::new(server_config.admin_role.as_str())
        .map_err(|e| std::io::Error::other(format!("Invalid admin role: {e}")))?;

    let state = web::Data::new(AppState {
        display: DisplayManager::new(tera, ShapeTable::with_defaults()),
        authorizer: RoleAuthorizer::new(admin_role.as_str()),
        catalog,
        admin_role,
    });
    let repo = web::Data::new(repo);
    let common_config = web::Data::new(common_config);

    let bind_address = (server_config.address.clone(), server_config.port);
    let cookie_domain = format!(".{}", server_config.domain);

    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(cookie_domain.clone()))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(BlockingPath::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(show_users)
            .service(show_create_user)
            .service(create_user)
            .service(show_edit_user)
            .service(update_user)
            .service(delete_user)
            .service(show_settings)
            .service(save_settings)
            .app_data(state.clone())
            .app_data(repo.clone())
            .app_data(common_config.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
