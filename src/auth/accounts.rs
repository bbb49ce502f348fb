// src/auth/accounts.rs
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::auth::sessions::create_session;
use crate::auth::token::{digests_equal, generate_salt, hash_password};
use crate::db::users::{self, UserProfile};
use crate::errors::ServerError;

pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Sign-up payload: credentials plus optional contact details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Registration {
    fn profile(&self) -> UserProfile {
        UserProfile {
            full_name: non_blank(self.full_name.as_deref()),
            phone: non_blank(self.phone.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    #[serde(skip)]
    pub user_id: i64,
    pub token: String,
}

pub struct AccountService {
    session_ttl_secs: i64,
}

impl AccountService {
    pub fn new(session_ttl_secs: i64) -> Self {
        Self { session_ttl_secs }
    }

    /// Trim + lowercase; letters, digits, `.`, `_`, `-` only.
    pub fn normalize_username(username: &str) -> Result<String, ServerError> {
        let u = username.trim().to_lowercase();
        let valid_chars = u
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if u.len() < 3 || u.len() > 64 || !valid_chars {
            return Err(ServerError::BadRequest("invalid username".into()));
        }
        Ok(u)
    }

    /// Creates the user and signs them in.
    pub fn register(
        &self,
        conn: &Connection,
        signup: &Registration,
        now: i64,
    ) -> Result<IssuedSession, ServerError> {
        let username = Self::normalize_username(&signup.username)?;
        if signup.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServerError::BadRequest(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let salt = generate_salt();
        let hash = hash_password(&salt, &signup.password);
        let user_id = users::insert_user(conn, &username, &signup.profile(), &salt, &hash, now)?;
        let token = create_session(conn, user_id, now, self.session_ttl_secs)?;

        Ok(IssuedSession { user_id, token })
    }

    pub fn login(
        &self,
        conn: &Connection,
        creds: &Credentials,
        now: i64,
    ) -> Result<IssuedSession, ServerError> {
        let rejected = || ServerError::Unauthorized("invalid username or password".into());

        let username = Self::normalize_username(&creds.username).map_err(|_| rejected())?;
        let Some(user) = users::find_credentials(conn, &username)? else {
            return Err(rejected());
        };

        let candidate = hash_password(&user.password_salt, &creds.password);
        if !digests_equal(&candidate, &user.password_hash) {
            return Err(rejected());
        }

        users::touch_last_login(conn, user.id, now)?;
        let token = create_session(conn, user.id, now, self.session_ttl_secs)?;

        Ok(IssuedSession {
            user_id: user.id,
            token,
        })
    }
}
