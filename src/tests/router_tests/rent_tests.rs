use super::{authed, register};
use crate::app::App;
use crate::router::handle;
use crate::tests::utils::{body_json, json_body, seed_spot, test_app};
use astra::Body;
use http::Method;
use rust_decimal_macros::dec;
use serde_json::json;

fn get_json(app: &App, uri: &str, token: &str) -> serde_json::Value {
    let resp = handle(authed(Method::GET, uri, token, Body::empty()), app).unwrap();
    assert_eq!(resp.status(), 200);
    body_json(resp)
}

#[test]
fn book_cancel_and_cancel_again() {
    let app = test_app();
    let alice = register(&app, "alice");
    let spot = seed_spot(&app.db, "P-1", dec!(10.00));

    // book
    let resp = handle(
        authed(
            Method::POST,
            &format!("/api/v1/rents/book/{}", spot.id),
            &alice,
            Body::empty(),
        ),
        &app,
    )
    .expect("book failed");
    assert_eq!(resp.status(), 201);
    let rent = body_json(resp);
    assert_eq!(rent["active"], true);
    assert_eq!(rent["totalPrice"], "10.00");
    assert_eq!(rent["paymentStatus"], "PAID");
    assert!(rent["endTime"].is_null());

    let spot_json = get_json(&app, &format!("/api/v1/parking-spots/{}", spot.id), &alice);
    assert_eq!(spot_json["available"], false);

    let active = get_json(&app, "/api/v1/rents/my-active", &alice);
    assert_eq!(active["id"], rent["id"]);

    // cancel
    let rent_id = rent["id"].as_i64().unwrap();
    let resp = handle(
        authed(
            Method::POST,
            &format!("/api/v1/rents/cancel/{rent_id}"),
            &alice,
            Body::empty(),
        ),
        &app,
    )
    .expect("cancel failed");
    assert_eq!(resp.status(), 204);

    let spot_json = get_json(&app, &format!("/api/v1/parking-spots/{}", spot.id), &alice);
    assert_eq!(spot_json["available"], true);
    assert!(get_json(&app, "/api/v1/rents/my-active", &alice).is_null());

    let history = get_json(&app, "/api/v1/rents/my", &alice);
    assert_eq!(history[0]["active"], false);

    // cancel again
    let res = handle(
        authed(
            Method::POST,
            &format!("/api/v1/rents/cancel/{rent_id}"),
            &alice,
            Body::empty(),
        ),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 409));
}

#[test]
fn second_booker_gets_conflict() {
    let app = test_app();
    let alice = register(&app, "alice");
    let bob = register(&app, "bob");
    let spot = seed_spot(&app.db, "P-2", dec!(5.00));
    let uri = format!("/api/v1/rents/book/{}", spot.id);

    let first = handle(authed(Method::POST, &uri, &alice, Body::empty()), &app).unwrap();
    assert_eq!(first.status(), 201);

    let second = handle(authed(Method::POST, &uri, &bob, Body::empty()), &app);
    assert!(matches!(second, Err(e) if e.status() == 409));
}

#[test]
fn cancelling_someone_elses_rent_is_forbidden() {
    let app = test_app();
    let alice = register(&app, "alice");
    let bob = register(&app, "bob");
    let spot = seed_spot(&app.db, "P-3", dec!(5.00));

    let resp = handle(
        authed(
            Method::POST,
            &format!("/api/v1/rents/book/{}", spot.id),
            &alice,
            Body::empty(),
        ),
        &app,
    )
    .unwrap();
    let rent_id = body_json(resp)["id"].as_i64().unwrap();

    let res = handle(
        authed(
            Method::POST,
            &format!("/api/v1/rents/cancel/{rent_id}"),
            &bob,
            Body::empty(),
        ),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 403));

    let active = get_json(&app, "/api/v1/rents/my-active", &alice);
    assert_eq!(active["id"], rent_id);
}

#[test]
fn fixed_period_booking_uses_end_time() {
    let app = test_app();
    let alice = register(&app, "alice");
    let spot = seed_spot(&app.db, "P-4", dec!(2.00));

    let end = chrono::Utc::now() + chrono::Duration::minutes(150);
    let resp = handle(
        authed(
            Method::POST,
            &format!("/api/v1/rents/book/{}", spot.id),
            &alice,
            json_body(json!({ "endTime": end.to_rfc3339() })),
        ),
        &app,
    )
    .unwrap();
    let rent = body_json(resp);
    assert!(rent["endTime"].is_string());
    // 150 minutes rounds up to 3 hours.
    assert_eq!(rent["totalPrice"], "6.00");
}

#[test]
fn booking_unknown_spot_is_404() {
    let app = test_app();
    let alice = register(&app, "alice");

    let res = handle(
        authed(Method::POST, "/api/v1/rents/book/4242", &alice, Body::empty()),
        &app,
    );
    assert!(matches!(res, Err(e) if e.status() == 404));
}
