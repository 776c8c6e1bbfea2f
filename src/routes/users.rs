use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};

use crate::display::Shape;
use crate::dto::users::UsersIndexQuery;
use crate::forms::users::UserForm;
use crate::notify::FlashNotifier;
use crate::repository::DieselRepository;
use crate::routes::{AppState, error_response};
use crate::services::users::{self as users_service, EditorOutcome, USERS_INDEX_PATH};

#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect(USERS_INDEX_PATH)
}

#[get("/users")]
pub async fn show_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    query: web::Query<UsersIndexQuery>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match users_service::load_users_page(repo.get_ref(), &ctx, query.into_inner()).await {
        Ok(page) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "users",
                &server_config.auth_service_url,
            );
            context.insert("page", &page);
            render_template(state.display.tera(), "users/index.html", &context)
        }
        Err(err) => error_response(err, "list users"),
    }
}

fn render_editor(
    state: &AppState,
    server_config: &CommonServerConfig,
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    template: &str,
    editor: &Shape,
) -> actix_web::HttpResponse {
    let mut context = base_context(
        flash_messages,
        user,
        "users",
        &server_config.auth_service_url,
    );
    context.insert("editor", editor);
    render_template(state.display.tera(), template, &context)
}

#[get("/users/create")]
pub async fn show_create_user(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match users_service::load_create_editor(&ctx).await {
        Ok(editor) => render_editor(
            &state,
            &server_config,
            &flash_messages,
            &user,
            "users/create.html",
            &editor,
        ),
        Err(err) => error_response(err, "show the user editor"),
    }
}

#[post("/users/create")]
pub async fn create_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    web::Form(form): web::Form<UserForm>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match users_service::create_user(repo.get_ref(), &ctx, form).await {
        Ok(EditorOutcome::Saved) => redirect(USERS_INDEX_PATH),
        Ok(EditorOutcome::Invalid(editor)) => render_editor(
            &state,
            &server_config,
            &flash_messages,
            &user,
            "users/create.html",
            &editor,
        ),
        Err(err) => error_response(err, "create the user"),
    }
}

#[get("/users/{user_id}/edit")]
pub async fn show_edit_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match users_service::load_edit_editor(repo.get_ref(), &ctx, user_id.into_inner()).await {
        Ok(editor) => render_editor(
            &state,
            &server_config,
            &flash_messages,
            &user,
            "users/edit.html",
            &editor,
        ),
        Err(err) => error_response(err, "show the user editor"),
    }
}

#[post("/users/{user_id}/edit")]
pub async fn update_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    web::Form(form): web::Form<UserForm>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match users_service::update_user(repo.get_ref(), &ctx, user_id.into_inner(), form).await {
        Ok(EditorOutcome::Saved) => redirect(USERS_INDEX_PATH),
        Ok(EditorOutcome::Invalid(editor)) => render_editor(
            &state,
            &server_config,
            &flash_messages,
            &user,
            "users/edit.html",
            &editor,
        ),
        Err(err) => error_response(err, "update the user"),
    }
}

#[post("/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    state: web::Data<AppState>,
) -> impl Responder {
    let notifier = FlashNotifier;
    let ctx = state.context(&user, &notifier);

    match users_service::delete_user(repo.get_ref(), &ctx, user_id.into_inner()) {
        Ok(_) => redirect(USERS_INDEX_PATH),
        Err(err) => error_response(err, "delete the user"),
    }
}
