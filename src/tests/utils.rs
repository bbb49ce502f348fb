use crate::app::App;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::{spots, users};
use crate::domain::spot::{NewSpot, ParkingSpot};
use crate::notify::ChangeFeed;
use astra::{Body, Response};
use rust_decimal::Decimal;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A fresh file-backed database (threads need to share it) built from the production schema.
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "parking_test_{}_{}_{}.sqlite",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        DB_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

pub fn seed_user(db: &Database, username: &str) -> i64 {
    db.with_conn(|conn| users::insert_user(conn, username, &Default::default(), b"salt", b"hash", 1000))
        .expect("Failed to seed user")
}

pub fn seed_spot(db: &Database, location: &str, price_per_hour: Decimal) -> ParkingSpot {
    let spot = NewSpot {
        location: location.into(),
        price_per_hour,
        available: None,
    };
    db.with_conn(|conn| spots::insert_spot(conn, &spot, 1000))
        .expect("Failed to seed spot")
}

pub fn test_app() -> App {
    let config = AppConfig::from_lookup(|_| None).expect("default config");
    App::new(init_test_db(), Arc::new(ChangeFeed::new()), &config)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response body is JSON")
}

pub fn json_body(value: serde_json::Value) -> Body {
    Body::from(value.to_string().into_bytes())
}
