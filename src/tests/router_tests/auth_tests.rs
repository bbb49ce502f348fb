use super::{authed, register};
use crate::router::handle;
use crate::tests::utils::{body_json, json_body, test_app};
use astra::Body;
use http::{Method, Request};
use serde_json::json;

#[test]
fn api_requires_session() {
    let app = test_app();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/parking-spots")
        .body(Body::empty())
        .unwrap();

    match handle(req, &app) {
        Err(e) => assert_eq!(e.status(), 401),
        Ok(resp) => panic!("expected 401, got {}", resp.status()),
    }
}

#[test]
fn login_returns_token_usable_as_cookie() {
    let app = test_app();
    register(&app, "alice");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .body(json_body(json!({ "username": "Alice", "password": "correct horse" })))
        .unwrap();
    let resp = handle(req, &app).expect("login failed");
    assert_eq!(resp.status(), 200);
    let token = body_json(resp)["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/parking-spots")
        .header("Cookie", format!("session={token}"))
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).expect("cookie session rejected");
    assert_eq!(resp.status(), 200);
}

#[test]
fn logout_revokes_token() {
    let app = test_app();
    let token = register(&app, "alice");

    let resp = handle(
        authed(Method::POST, "/api/v1/auth/logout", &token, Body::empty()),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 204);

    let res = handle(
        authed(Method::GET, "/api/v1/rents/my-active", &token, Body::empty()),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 401));
}

#[test]
fn bad_password_is_unauthorized() {
    let app = test_app();
    register(&app, "alice");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .body(json_body(json!({ "username": "alice", "password": "nope nope nope" })))
        .unwrap();
    assert!(matches!(handle(req, &app), Err(e) if e.status() == 401));
}
