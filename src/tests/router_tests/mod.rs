mod auth_tests;
mod rent_tests;
mod spot_tests;

use crate::app::App;
use crate::router::handle;
use crate::tests::utils::{body_json, json_body};
use astra::Body;
use http::{Method, Request};
use serde_json::json;

/// Registers a user through the API and returns their bearer token.
pub(crate) fn register(app: &App, username: &str) -> String {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/register")
        .header("Content-Type", "application/json")
        .body(json_body(json!({ "username": username, "password": "correct horse" })))
        .unwrap();

    let resp = handle(req, app).expect("register failed");
    assert_eq!(resp.status(), 201);
    body_json(resp)["token"]
        .as_str()
        .expect("token in response")
        .to_string()
}

pub(crate) fn authed(method: Method, uri: &str, token: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(body)
        .unwrap()
}
