use super::{authed, register};
use crate::app::App;
use crate::config::AppConfig;
use crate::notify::ChangeFeed;
use crate::router::handle;
use crate::tests::utils::{body_json, body_string, init_test_db, json_body, test_app};
use astra::Body;
use http::{Method, Request};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn create_spot(app: &App, token: &str, location: &str, price: &str) -> serde_json::Value {
    let resp = handle(
        authed(
            Method::POST,
            "/api/v1/parking-spots",
            token,
            json_body(json!({ "location": location, "pricePerHour": price })),
        ),
        app,
    )
    .expect("create spot failed");
    assert_eq!(resp.status(), 201);
    body_json(resp)
}

#[test]
fn create_and_list_spots() {
    let app = test_app();
    let token = register(&app, "alice");

    let created = create_spot(&app, &token, "Test-01", "10.00");
    assert_eq!(created["location"], "Test-01");
    assert_eq!(created["pricePerHour"], "10.00");
    assert_eq!(created["available"], true);

    let resp = handle(
        authed(Method::GET, "/api/v1/parking-spots/available", &token, Body::empty()),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let available = body_json(resp);
    assert_eq!(available[0]["location"], "Test-01");

    let id = created["id"].as_i64().unwrap();
    let resp = handle(
        authed(Method::GET, &format!("/api/v1/parking-spots/{id}"), &token, Body::empty()),
        &app,
    )
    .unwrap();
    assert_eq!(body_json(resp)["id"], id);
}

#[test]
fn unknown_spot_is_404() {
    let app = test_app();
    let token = register(&app, "alice");

    let res = handle(
        authed(Method::GET, "/api/v1/parking-spots/999", &token, Body::empty()),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 404));
}

#[test]
fn invalid_spot_payload_is_400() {
    let app = test_app();
    let token = register(&app, "alice");

    for payload in [
        json!({ "location": " ", "pricePerHour": "1.00" }),
        json!({ "location": "A-1", "pricePerHour": "-5" }),
        json!({ "location": "A-1", "pricePerHour": "1.00", "available": false }),
    ] {
        let res = handle(
            authed(Method::POST, "/api/v1/parking-spots", &token, json_body(payload)),
            &app,
        );
        assert!(matches!(res, Err(e) if e.status() == 400));
    }
}

#[test]
fn oversized_price_is_400() {
    let app = test_app();
    let token = register(&app, "alice");
    let created = create_spot(&app, &token, "A-9", "1.00");
    let id = created["id"].as_i64().unwrap();
    let huge = "79228162514264337593543950335";

    let res = handle(
        authed(
            Method::POST,
            "/api/v1/parking-spots",
            &token,
            json_body(json!({ "location": "A-10", "pricePerHour": huge })),
        ),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 400));

    let res = handle(
        authed(
            Method::PUT,
            &format!("/api/v1/parking-spots/{id}/price"),
            &token,
            json_body(json!({ "pricePerHour": huge })),
        ),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 400));
}

#[test]
fn board_page_renders_spots() {
    let app = test_app();
    let token = register(&app, "alice");
    create_spot(&app, &token, "A-15", "3.50");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).expect("board failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("A-15"));
    assert!(body.contains("1 of 1 spots free"));
}

#[test]
fn changes_long_poll_reports_new_version() {
    let app = test_app();
    let token = register(&app, "alice");
    let before = app.feed.current();
    create_spot(&app, &token, "A-1", "2.00");

    let resp = handle(
        authed(
            Method::GET,
            &format!("/api/v1/parking-spots/changes?after={before}&timeout=1"),
            &token,
            Body::empty(),
        ),
        &app,
    )
    .unwrap();
    let body = body_json(resp);
    assert_eq!(body["event"], "updated");
    assert_eq!(body["version"], before + 1);
}

#[test]
fn changes_long_poll_returns_at_once_when_listeners_are_full() {
    let config = AppConfig::from_lookup(|_| None).unwrap();
    let app = App::new(init_test_db(), Arc::new(ChangeFeed::with_max_waiters(0)), &config);
    let token = register(&app, "alice");
    let before = app.feed.current();

    let started = Instant::now();
    let resp = handle(
        authed(
            Method::GET,
            &format!("/api/v1/parking-spots/changes?after={before}&timeout=20"),
            &token,
            Body::empty(),
        ),
        &app,
    )
    .unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));

    let body = body_json(resp);
    assert_eq!(body["event"], "timeout");
    assert_eq!(body["version"], before);
}
