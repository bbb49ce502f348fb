// src/auth/identity.rs
use astra::Request;

use crate::auth::sessions::load_user_from_session;
use crate::db::connection::Database;
use crate::errors::ServerError;

/// Session token from `Authorization: Bearer …` or the `session` cookie.
pub fn session_token(req: &Request) -> Option<String> {
    let headers = req.headers();

    if let Some(value) = headers.get("Authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == "session" && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The acting user for a request, or `Unauthorized`.
pub fn require_user(req: &Request, db: &Database, now: i64) -> Result<i64, ServerError> {
    let token = session_token(req)
        .ok_or_else(|| ServerError::Unauthorized("missing session token".into()))?;

    db.with_conn(|conn| load_user_from_session(conn, &token, now))?
        .ok_or_else(|| ServerError::Unauthorized("invalid or expired session".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra::Body;

    fn request(header: (&str, &str)) -> Request {
        http::Request::builder()
            .uri("/api/v1/rents/my-active")
            .header(header.0, header.1)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn bearer_header_is_read() {
        let req = request(("Authorization", "Bearer abc123"));
        assert_eq!(session_token(&req).as_deref(), Some("abc123"));
    }

    #[test]
    fn session_cookie_is_read_among_others() {
        let req = request(("Cookie", "theme=dark; session=tok_1; lang=en"));
        assert_eq!(session_token(&req).as_deref(), Some("tok_1"));
    }

    #[test]
    fn missing_token_is_none() {
        let req = request(("Authorization", "Basic Zm9vOmJhcg=="));
        assert_eq!(session_token(&req), None);
    }
}
