//! Repository implementation for user accounts.

use diesel::expression::BoxableExpression;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::types::{RoleName, UserId, UserStatus};
use crate::domain::user::{NewUser, UpdateUser, User, UsersFilter, UsersOrder};
use crate::models::user::{
    NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser, UserRole as DbUserRole,
};
use crate::repository::session::PendingWrite;
use crate::repository::{DieselRepository, UserListQuery, UserReader, UserWriter};
use crate::schema::{user_roles, users};

diesel::define_sql_function! {
    /// SQLite `instr`, position of `needle` in `haystack` or zero. Unlike
    /// `LIKE` it is case-sensitive.
    fn instr(haystack: Text, needle: Text) -> diesel::sql_types::Integer;
}

/// Builds the filtered, unordered and unpaginated users query.
fn filtered_users(query: &UserListQuery) -> users::BoxedQuery<'static, Sqlite> {
    let mut items = users::table.into_boxed();

    items = match query.filter {
        UsersFilter::All => items,
        UsersFilter::Approved => {
            items.filter(users::registration_status.eq(UserStatus::Approved.as_str()))
        }
        UsersFilter::Pending => {
            items.filter(users::registration_status.eq(UserStatus::Pending.as_str()))
        }
        UsersFilter::EmailPending => {
            items.filter(users::email_status.eq(UserStatus::Pending.as_str()))
        }
    };

    if let Some(term) = &query.search {
        items = items.filter(
            instr(users::normalized_user_name, term.clone())
                .gt(0)
                .or(instr(users::normalized_email, term.clone()).gt(0)),
        );
    }

    items
}

/// Loads the roles of every given user and converts them into domain users,
/// preserving the input order.
fn attach_roles(conn: &mut SqliteConnection, db_users: Vec<DbUser>) -> RepositoryResult<Vec<User>> {
    let roles = DbUserRole::belonging_to(&db_users)
        .select(DbUserRole::as_select())
        .order(user_roles::role.asc())
        .load::<DbUserRole>(conn)?
        .grouped_by(&db_users);

    db_users
        .into_iter()
        .zip(roles)
        .map(|pair| User::try_from(pair).map_err(RepositoryError::from))
        .collect()
}

fn replace_roles(
    conn: &mut SqliteConnection,
    user_id: i32,
    roles: &[RoleName],
) -> RepositoryResult<()> {
    diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id))).execute(conn)?;

    if roles.is_empty() {
        return Ok(());
    }

    let rows = roles
        .iter()
        .map(|role| DbUserRole {
            user_id,
            role: role.as_str().to_string(),
        })
        .collect::<Vec<_>>();

    diesel::insert_into(user_roles::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn insert_user(conn: &mut SqliteConnection, new_user: &NewUser) -> RepositoryResult<usize> {
    let db_new_user: DbNewUser = new_user.into();

    let db_user = diesel::insert_into(users::table)
        .values(&db_new_user)
        .returning(DbUser::as_returning())
        .get_result(conn)?;

    replace_roles(conn, db_user.id, &new_user.roles)?;
    Ok(1)
}

fn update_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
    updates: &UpdateUser,
) -> RepositoryResult<usize> {
    let db_updates: DbUpdateUser = updates.into();

    let affected = diesel::update(users::table.find(user_id.get()))
        .set(&db_updates)
        .execute(conn)?;
    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }

    replace_roles(conn, user_id.get(), &updates.roles)?;
    Ok(affected)
}

fn delete_user(conn: &mut SqliteConnection, user_id: UserId) -> RepositoryResult<usize> {
    diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id.get())))
        .execute(conn)?;

    let affected = diesel::delete(users::table.find(user_id.get())).execute(conn)?;
    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(affected)
}

fn ensure_role_holder(conn: &mut SqliteConnection, role: &RoleName) -> RepositoryResult<usize> {
    let holders: i64 = user_roles::table
        .filter(user_roles::role.eq(role.as_str()))
        .count()
        .get_result(conn)?;
    if holders == 0 {
        return Err(RepositoryError::ConstraintViolation(format!(
            "No user left in role {}",
            role.as_str()
        )));
    }
    Ok(0)
}

type UserPredicate = Box<dyn BoxableExpression<users::table, Sqlite, SqlType = Bool>>;

impl DieselRepository {
    fn get_user_where(&self, predicate: UserPredicate) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;

        let db_user = users::table
            .filter(predicate)
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        match db_user {
            Some(db_user) => Ok(attach_roles(&mut conn, vec![db_user])?.pop()),
            None => Ok(None),
        }
    }
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.get_user_where(Box::new(users::id.eq(id.get())))
    }

    fn get_user_by_normalized_user_name(&self, name: &str) -> RepositoryResult<Option<User>> {
        self.get_user_where(Box::new(users::normalized_user_name.eq(name.to_string())))
    }

    fn get_user_by_normalized_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.get_user_where(Box::new(users::normalized_email.eq(email.to_string())))
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_users(&query).count().get_result(&mut conn)?;

        let mut items = filtered_users(&query);

        items = match query.order {
            Some(UsersOrder::Name) => items.order_by(users::normalized_user_name.asc()),
            Some(UsersOrder::Email) => items.order_by(users::normalized_email.asc()),
            Some(UsersOrder::CreatedUtc) => items.order_by(users::created_at.asc()),
            Some(UsersOrder::LastLoginUtc) => items.order_by(users::last_login_at.asc()),
            None => items,
        };
        items = items.then_order_by(users::id.asc());

        if let Some(pagination) = &query.pagination {
            let (Ok(offset), Ok(limit)) = (
                i64::try_from(pagination.offset),
                i64::try_from(pagination.limit),
            ) else {
                return Ok((total as usize, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let db_users = items
            .select(DbUser::as_select())
            .load::<DbUser>(&mut conn)?;

        let users = attach_roles(&mut conn, db_users)?;

        Ok((total as usize, users))
    }

    fn count_users_in_role(&self, role: &RoleName) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let count: i64 = user_roles::table
            .filter(user_roles::role.eq(role.as_str()))
            .count()
            .get_result(&mut conn)?;

        Ok(count as usize)
    }
}

impl UserWriter for DieselRepository {
    fn apply_user_writes(&self, writes: &[PendingWrite]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut affected = 0;
            for write in writes {
                affected += match write {
                    PendingWrite::Create(new_user) => insert_user(conn, new_user)?,
                    PendingWrite::Update(user_id, updates) => update_user(conn, *user_id, updates)?,
                    PendingWrite::Delete(user_id) => delete_user(conn, *user_id)?,
                    PendingWrite::EnsureRoleHolder(role) => ensure_role_holder(conn, role)?,
                };
            }
            Ok(affected)
        })
    }
}
