use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};

use crate::forms::settings::SettingsForm;
use crate::notify::FlashNotifier;
use crate::repository::DieselRepository;
use crate::routes::{AppState, error_response};
use crate::services::{ServiceError, settings as settings_service};

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match settings_service::load_settings(repo.get_ref(), &ctx) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("settings", &data.settings);
            render_template(state.display.tera(), "settings/index.html", &context)
        }
        Err(err) => error_response(err, "load site settings"),
    }
}

#[post("/settings")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
    web::Form(form): web::Form<SettingsForm>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match settings_service::save_settings(repo.get_ref(), &ctx, form) {
        Ok(()) => redirect("/settings"),
        Err(ServiceError::Form(key)) => {
            FlashMessage::error(state.catalog.t(&key).to_string()).send();
            redirect("/settings")
        }
        Err(ServiceError::Repository(err)) => {
            log::error!("Failed to save site settings: {err}");
            FlashMessage::error(state.catalog.t("settings_save_failed").to_string()).send();
            redirect("/settings")
        }
        Err(err) => error_response(err, "save site settings"),
    }
}
