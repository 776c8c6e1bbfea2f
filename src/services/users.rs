//! User administration workflows: list, create, edit and delete.

use futures::future::join_all;

use crate::display::{BuildContext, DisplayType, ModelState, Shape};
use crate::domain::identity::IdentityError;
use crate::domain::types::{UserId, normalize_lookup};
use crate::domain::user::{NewUser, UpdateUser};
use crate::dto::users::{UserEditor, UserEntry, UsersIndexQuery, UsersIndexViewModel};
use crate::forms::users::UserForm;
use crate::pagination::{Pager, PagerShape};
use crate::repository::session::{PendingWrite, UserSession};
use crate::repository::{SiteSettingsReader, UserListQuery, UserReader, UserWriter};
use crate::services::auth::{Permission, ensure_permission};
use crate::services::identity::UserManager;
use crate::services::{RequestContext, ServiceError, ServiceResult};

pub const USERS_INDEX_PATH: &str = "/users";

/// Result of submitting a create or edit form.
#[derive(Debug)]
pub enum EditorOutcome {
    Saved,
    /// Editor shape with the entered values and validation errors.
    Invalid(Shape),
}

#[derive(Debug)]
pub enum DeleteUserOutcome {
    Deleted,
    Failed(Vec<IdentityError>),
}

/// Loads one page of users with the requested filter, search and order.
pub async fn load_users_page<R>(
    repo: &R,
    ctx: &RequestContext<'_>,
    query: UsersIndexQuery,
) -> ServiceResult<UsersIndexViewModel>
where
    R: UserReader + SiteSettingsReader + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageUsers)?;

    let settings = repo.get_site_settings()?;
    let (options, pager_params) = query.into_parts();
    let pager = Pager::new(pager_params, settings.page_size);

    let mut list_query = UserListQuery::new()
        .filter(options.filter)
        .paginate(pager.start_index(), pager.page_size());
    if let Some(search) = &options.search {
        list_query = list_query.search(search.as_str());
    }
    if let Some(order) = options.order {
        list_query = list_query.order(order);
    }

    let (total, users) = repo.list_users(list_query).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    let build_ctx = BuildContext::new(ctx.user);
    let shapes = join_all(
        users
            .iter()
            .map(|user| ctx.display.build_display(user, &build_ctx, DisplayType::SummaryAdmin)),
    )
    .await;

    let users = users
        .iter()
        .zip(shapes)
        .map(|(user, shape)| {
            Ok(UserEntry {
                user_id: user.id,
                shape: shape?,
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let pager_model = PagerShape::new(&pager, total, USERS_INDEX_PATH, &options.route_data());
    let pager = ctx
        .display
        .build_display(&pager_model, &build_ctx, DisplayType::Detail)
        .await?;

    Ok(UsersIndexViewModel {
        users,
        options,
        pager,
        total,
    })
}

/// Editor shape for a blank user.
pub async fn load_create_editor(ctx: &RequestContext<'_>) -> ServiceResult<Shape> {
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageUsers)?;

    let build_ctx = BuildContext::new(ctx.user);
    Ok(ctx
        .display
        .build_editor(&UserEditor::default(), &build_ctx)
        .await?)
}

pub async fn create_user<R>(
    repo: &R,
    ctx: &RequestContext<'_>,
    form: UserForm,
) -> ServiceResult<EditorOutcome>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageUsers)?;

    let mut editor = UserEditor::default();
    let mut build_ctx = BuildContext::new(ctx.user);
    check_uniqueness(repo, &form, None, &mut build_ctx.model_state)?;

    let shape = ctx
        .display
        .update_editor(&mut editor, form, &mut build_ctx)
        .await?;
    if !build_ctx.model_state.is_valid() {
        return Ok(EditorOutcome::Invalid(shape));
    }

    let payload = editor.payload()?;
    let new_user = NewUser::new(
        payload.user_name,
        payload.email,
        payload.registration_status,
        payload.email_status,
        payload.roles,
    );

    let mut session = UserSession::new(repo);
    session.stage(PendingWrite::Create(new_user));
    session.commit().map_err(|err| {
        log::error!("Failed to create user: {err}");
        err
    })?;

    ctx.notifier.success(ctx.catalog.t("user_created"));
    Ok(EditorOutcome::Saved)
}

pub async fn load_edit_editor<R>(
    repo: &R,
    ctx: &RequestContext<'_>,
    user_id: i32,
) -> ServiceResult<Shape>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageUsers)?;

    let id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;
    let user = UserManager::new(repo, ctx.admin_role).find_by_id(id)?;

    let build_ctx = BuildContext::new(ctx.user);
    Ok(ctx
        .display
        .build_editor(&UserEditor::from(&user), &build_ctx)
        .await?)
}

pub async fn update_user<R>(
    repo: &R,
    ctx: &RequestContext<'_>,
    user_id: i32,
    form: UserForm,
) -> ServiceResult<EditorOutcome>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageUsers)?;

    let id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;
    let user = UserManager::new(repo, ctx.admin_role).find_by_id(id)?;

    let mut editor = UserEditor::from(&user);
    let mut build_ctx = BuildContext::new(ctx.user);
    check_uniqueness(repo, &form, Some(id), &mut build_ctx.model_state)?;

    let shape = ctx
        .display
        .update_editor(&mut editor, form, &mut build_ctx)
        .await?;
    if !build_ctx.model_state.is_valid() {
        return Ok(EditorOutcome::Invalid(shape));
    }

    let payload = editor.payload()?;
    let update = UpdateUser::new(
        payload.user_name,
        payload.email,
        payload.registration_status,
        payload.email_status,
        payload.roles,
    );

    let mut session = UserSession::new(repo);
    session.stage(PendingWrite::Update(id, update));
    session.commit().map_err(|err| {
        log::error!("Failed to update user {id}: {err}");
        err
    })?;

    ctx.notifier.success(ctx.catalog.t("user_updated"));
    Ok(EditorOutcome::Saved)
}

/// Deletes a user through the identity manager. Failures are reported to the
/// notifier as one aggregate message followed by one message per error.
pub fn delete_user<R>(
    repo: &R,
    ctx: &RequestContext<'_>,
    user_id: i32,
) -> ServiceResult<DeleteUserOutcome>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_permission(ctx.authorizer, ctx.user, Permission::ManageUsers)?;

    let id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;
    let manager = UserManager::new(repo, ctx.admin_role);
    let user = manager.find_by_id(id)?;

    let mut session = UserSession::new(repo);
    let result = manager.delete(&mut session, ctx.user, &user)?;

    if result.succeeded() {
        ctx.notifier.success(ctx.catalog.t("user_deleted"));
        return Ok(DeleteUserOutcome::Deleted);
    }

    session.cancel();
    ctx.notifier.error(ctx.catalog.t("user_delete_failed"));
    for error in &result.errors {
        ctx.notifier.error(ctx.catalog.t(&error.description));
    }
    Ok(DeleteUserOutcome::Failed(result.errors))
}

/// Records an error for every submitted value already used by another
/// account. Comparison uses the normalized forms.
fn check_uniqueness<R>(
    repo: &R,
    form: &UserForm,
    current: Option<UserId>,
    state: &mut ModelState,
) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    let is_other = |id: UserId| Some(id) != current;

    let user_name = normalize_lookup(&form.user_name);
    if !user_name.is_empty()
        && repo
            .get_user_by_normalized_user_name(&user_name)?
            .is_some_and(|existing| is_other(existing.id))
    {
        state.add_error("user_name", "user_name_taken");
    }

    let email = normalize_lookup(&form.email);
    if !email.is_empty()
        && repo
            .get_user_by_normalized_email(&email)?
            .is_some_and(|existing| is_other(existing.id))
    {
        state.add_error("email", "email_taken");
    }

    Ok(())
}
