// src/db/spots.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::money::{from_cents, to_cents};
use crate::domain::spot::{NewSpot, ParkingSpot};
use crate::errors::ServerError;

const SPOT_COLUMNS: &str = "id, location, price_cents, available";

fn map_spot(row: &Row<'_>) -> rusqlite::Result<ParkingSpot> {
    Ok(ParkingSpot {
        id: row.get(0)?,
        location: row.get(1)?,
        price_per_hour: from_cents(row.get(2)?),
        available: row.get(3)?,
    })
}

pub fn get_spot(conn: &Connection, spot_id: i64) -> Result<Option<ParkingSpot>, ServerError> {
    conn.query_row(
        &format!("select {SPOT_COLUMNS} from parking_spots where id = ?"),
        params![spot_id],
        map_spot,
    )
    .optional()
    .map_err(|e| ServerError::db("select spot failed", e))
}

pub fn list_spots(conn: &Connection) -> Result<Vec<ParkingSpot>, ServerError> {
    query_spots(conn, &format!("select {SPOT_COLUMNS} from parking_spots order by id"))
}

pub fn list_available_spots(conn: &Connection) -> Result<Vec<ParkingSpot>, ServerError> {
    query_spots(
        conn,
        &format!("select {SPOT_COLUMNS} from parking_spots where available = 1 order by id"),
    )
}

fn query_spots(conn: &Connection, sql: &str) -> Result<Vec<ParkingSpot>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::db("prepare spot query failed", e))?;

    let rows = stmt
        .query_map([], map_spot)
        .map_err(|e| ServerError::db("query spots failed", e))?;

    let mut spots = Vec::new();
    for r in rows {
        spots.push(r.map_err(|e| ServerError::db("read spot row failed", e))?);
    }
    Ok(spots)
}

/// Registers a spot. Callers pass a payload that went through `NewSpot::normalized`.
pub fn insert_spot(conn: &Connection, spot: &NewSpot, now: i64) -> Result<ParkingSpot, ServerError> {
    let price_cents = to_cents(spot.price_per_hour)?;
    let available = spot.available.unwrap_or(true);

    conn.execute(
        "insert into parking_spots (location, price_cents, available, created_at) values (?, ?, ?, ?)",
        params![spot.location, price_cents, available, now],
    )
    .map_err(|e| ServerError::db("insert spot failed", e))?;

    Ok(ParkingSpot {
        id: conn.last_insert_rowid(),
        location: spot.location.clone(),
        price_per_hour: from_cents(price_cents),
        available,
    })
}

/// Sets the availability flag. Returns false when the spot does not exist.
pub fn set_availability(conn: &Connection, spot_id: i64, available: bool) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update parking_spots set available = ? where id = ?",
            params![available, spot_id],
        )
        .map_err(|e| ServerError::db("update spot availability failed", e))?;
    Ok(updated == 1)
}

/// Flips a free spot to occupied (guard `available = 1` so only one claimer wins).
/// Returns false when the spot was already taken.
pub fn claim_spot(conn: &Connection, spot_id: i64) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update parking_spots set available = 0 where id = ? and available = 1",
            params![spot_id],
        )
        .map_err(|e| ServerError::db("claim spot failed", e))?;
    Ok(updated == 1)
}

/// Changes the hourly price for future rents. Existing rents keep their snapshot.
pub fn set_price(
    conn: &Connection,
    spot_id: i64,
    price_per_hour: rust_decimal::Decimal,
) -> Result<bool, ServerError> {
    let price_cents = to_cents(price_per_hour)?;
    let updated = conn
        .execute(
            "update parking_spots set price_cents = ? where id = ?",
            params![price_cents, spot_id],
        )
        .map_err(|e| ServerError::db("update spot price failed", e))?;
    Ok(updated == 1)
}
