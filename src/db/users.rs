// src/db/users.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::{is_unique_violation, ServerError};

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_salt: Vec<u8>,
    pub password_hash: Vec<u8>,
}

/// Optional contact details captured at registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// Username should already be normalized by caller (trim/lowercase).
pub fn insert_user(
    conn: &Connection,
    username: &str,
    profile: &UserProfile,
    password_salt: &[u8],
    password_hash: &[u8],
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into users (username, full_name, phone, password_salt, password_hash, created_at)
        values (?, ?, ?, ?, ?, ?)
        "#,
        params![
            username,
            profile.full_name,
            profile.phone,
            password_salt,
            password_hash,
            now
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            ServerError::Conflict(format!("username {username} is already taken"))
        } else {
            ServerError::db("insert user failed", e)
        }
    })?;
    Ok(conn.last_insert_rowid())
}

pub fn find_credentials(
    conn: &Connection,
    username: &str,
) -> Result<Option<UserCredentials>, ServerError> {
    conn.query_row(
        "select id, username, password_salt, password_hash from users where username = ?",
        params![username],
        |r| {
            Ok(UserCredentials {
                id: r.get(0)?,
                username: r.get(1)?,
                password_salt: r.get(2)?,
                password_hash: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::db("select user failed", e))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::db("update last_login_at failed", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_is_conflict() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();

        let profile = UserProfile::default();
        let id = insert_user(&conn, "alice", &profile, b"salt", b"hash", 1000).unwrap();
        let creds = find_credentials(&conn, "alice").unwrap().unwrap();
        assert_eq!(creds.id, id);
        assert_eq!(creds.password_salt, b"salt".to_vec());

        let again = insert_user(&conn, "alice", &profile, b"salt", b"hash", 1001);
        assert!(matches!(again, Err(ServerError::Conflict(_))));
        assert!(find_credentials(&conn, "nobody").unwrap().is_none());
    }
}
