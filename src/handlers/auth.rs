// src/handlers/auth.rs
use astra::Request;
use tracing::info;

use crate::app::App;
use crate::auth::accounts::{Credentials, Registration};
use crate::auth::identity::session_token;
use crate::auth::sessions::revoke_session;
use crate::requests::read_json;
use crate::responses::{json_response, no_content, ResultResp};

pub fn register(req: &mut Request, app: &App, now: i64) -> ResultResp {
    let signup: Registration = read_json(req)?;
    let issued = app
        .db
        .with_conn(|conn| app.accounts.register(conn, &signup, now))?;
    info!(user_id = issued.user_id, "user registered");
    json_response(201, &issued)
}

pub fn login(req: &mut Request, app: &App, now: i64) -> ResultResp {
    let creds: Credentials = read_json(req)?;
    let issued = app
        .db
        .with_conn(|conn| app.accounts.login(conn, &creds, now))?;
    info!(user_id = issued.user_id, "user logged in");
    json_response(200, &issued)
}

pub fn logout(req: &Request, app: &App, now: i64) -> ResultResp {
    if let Some(token) = session_token(req) {
        app.db
            .with_conn(|conn| revoke_session(conn, &token, now))?;
    }
    no_content()
}
