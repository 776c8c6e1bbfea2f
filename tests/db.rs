use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use pushkind_users::schema::user_roles;

mod common;

#[test]
fn test_pool_connects_to_migrated_database() {
    let test_db = common::TestDb::new("test_pool_connects.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_foreign_keys_cascade_role_rows() {
    let test_db = common::TestDb::new("test_foreign_keys.db");
    let mut conn = test_db.pool().get().expect("connection");

    conn.batch_execute(
        "INSERT INTO users (id, user_name, normalized_user_name, email, normalized_email) \
         VALUES (1, 'Ann', 'ann', 'ann@example.com', 'ann@example.com'); \
         INSERT INTO user_roles (user_id, role) VALUES (1, 'editor'); \
         DELETE FROM users WHERE id = 1;",
    )
    .expect("statements run");

    let remaining: i64 = user_roles::table
        .count()
        .get_result(&mut conn)
        .expect("count roles");
    assert_eq!(remaining, 0);
}
