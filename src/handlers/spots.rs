// src/handlers/spots.rs
use astra::Request;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use crate::app::App;
use crate::db::spots;
use crate::domain::spot::{NewSpot, PriceChange};
use crate::errors::ServerError;
use crate::notify::notify_best_effort;
use crate::requests::{parse_query, read_json};
use crate::responses::{json_response, ResultResp};

/// Upper bound for one long-poll wait; keeps astra workers from being pinned.
const MAX_CHANGE_WAIT: Duration = Duration::from_secs(25);

pub fn list_all(app: &App) -> ResultResp {
    let spots = app.db.with_conn(|conn| spots::list_spots(conn))?;
    json_response(200, &spots)
}

pub fn list_available(app: &App) -> ResultResp {
    let spots = app.db.with_conn(|conn| spots::list_available_spots(conn))?;
    json_response(200, &spots)
}

pub fn get_one(app: &App, spot_id: i64) -> ResultResp {
    let spot = app
        .db
        .with_conn(|conn| spots::get_spot(conn, spot_id))?
        .ok_or_else(|| ServerError::NotFound(format!("parking spot {spot_id} not found")))?;
    json_response(200, &spot)
}

pub fn create(req: &mut Request, app: &App, now: i64) -> ResultResp {
    let new_spot = read_json::<NewSpot>(req)?.normalized()?;
    let spot = app
        .db
        .with_conn(|conn| spots::insert_spot(conn, &new_spot, now))?;
    info!(spot_id = spot.id, location = %spot.location, "parking spot created");

    notify_best_effort(app.feed.as_ref());
    json_response(201, &spot)
}

pub fn change_price(req: &mut Request, app: &App, spot_id: i64) -> ResultResp {
    let change: PriceChange = read_json(req)?;
    let spot = app.db.with_conn(|conn| {
        if !spots::set_price(conn, spot_id, change.price_per_hour)? {
            return Err(ServerError::NotFound(format!("parking spot {spot_id} not found")));
        }
        spots::get_spot(conn, spot_id)?
            .ok_or_else(|| ServerError::NotFound(format!("parking spot {spot_id} not found")))
    })?;
    info!(spot_id, price_per_hour = %spot.price_per_hour, "parking spot price changed");

    notify_best_effort(app.feed.as_ref());
    json_response(200, &spot)
}

/// Long-poll: returns once the feed version passes `after`, or on timeout.
pub fn changes(req: &Request, app: &App) -> ResultResp {
    let query = parse_query(req);
    let after = match query.get("after") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ServerError::BadRequest(format!("invalid after: {raw}")))?,
        None => app.feed.current(),
    };
    let wait = match query.get("timeout") {
        Some(raw) => Duration::from_secs(
            raw.parse::<u64>()
                .map_err(|_| ServerError::BadRequest(format!("invalid timeout: {raw}")))?,
        ),
        None => MAX_CHANGE_WAIT,
    }
    .min(MAX_CHANGE_WAIT);

    let version = app.feed.wait_for_change(after, wait);
    let event = if version > after { "updated" } else { "timeout" };
    json_response(200, &json!({ "version": version, "event": event }))
}
