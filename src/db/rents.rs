// src/db/rents.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::money::{from_cents, to_cents};
use crate::domain::rent::{NewRent, Rent};
use crate::errors::{is_unique_violation, ServerError};

const RENT_COLUMNS: &str = "id, spot_id, user_id, start_time, end_time, active, \
     price_at_rent_cents, total_price_cents, payment_status";

fn map_rent(row: &Row<'_>) -> rusqlite::Result<Rent> {
    Ok(Rent {
        id: row.get(0)?,
        spot_id: row.get(1)?,
        user_id: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        active: row.get(5)?,
        price_at_rent_time: from_cents(row.get(6)?),
        total_price: from_cents(row.get(7)?),
        payment_status: row.get(8)?,
    })
}

fn query_rents(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Rent>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::db("prepare rent query failed", e))?;

    let rows = stmt
        .query_map(params, map_rent)
        .map_err(|e| ServerError::db("query rents failed", e))?;

    let mut rents = Vec::new();
    for r in rows {
        rents.push(r.map_err(|e| ServerError::db("read rent row failed", e))?);
    }
    Ok(rents)
}

/// Writes a new rent. The caller has already claimed the spot in the same transaction.
///
/// A second active rent for the same spot hits the partial unique index and
/// surfaces as `Conflict`.
pub fn insert_rent(conn: &Connection, rent: &NewRent) -> Result<Rent, ServerError> {
    let price_cents = to_cents(rent.price_at_rent_time)?;
    let total_cents = to_cents(rent.total_price)?;

    conn.execute(
        "insert into rents
           (spot_id, user_id, start_time, end_time, active,
            price_at_rent_cents, total_price_cents, payment_status)
         values (?, ?, ?, ?, 1, ?, ?, ?)",
        params![
            rent.spot_id,
            rent.user_id,
            rent.start_time,
            rent.end_time,
            price_cents,
            total_cents,
            rent.payment_status,
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            ServerError::Conflict("parking spot is already rented".into())
        } else {
            ServerError::db("insert rent failed", e)
        }
    })?;

    Ok(Rent {
        id: conn.last_insert_rowid(),
        spot_id: rent.spot_id,
        user_id: rent.user_id,
        start_time: rent.start_time,
        end_time: rent.end_time,
        active: true,
        price_at_rent_time: from_cents(price_cents),
        total_price: from_cents(total_cents),
        payment_status: rent.payment_status,
    })
}

pub fn get_rent(conn: &Connection, rent_id: i64) -> Result<Option<Rent>, ServerError> {
    conn.query_row(
        &format!("select {RENT_COLUMNS} from rents where id = ?"),
        params![rent_id],
        map_rent,
    )
    .optional()
    .map_err(|e| ServerError::db("select rent failed", e))
}

pub fn find_active_by_spot(conn: &Connection, spot_id: i64) -> Result<Vec<Rent>, ServerError> {
    query_rents(
        conn,
        &format!("select {RENT_COLUMNS} from rents where spot_id = ? and active = 1 order by id"),
        params![spot_id],
    )
}

/// The user's active rent, if any. Should more than one exist, the oldest wins.
pub fn find_active_by_user(conn: &Connection, user_id: i64) -> Result<Option<Rent>, ServerError> {
    conn.query_row(
        &format!(
            "select {RENT_COLUMNS} from rents where user_id = ? and active = 1 order by id limit 1"
        ),
        params![user_id],
        map_rent,
    )
    .optional()
    .map_err(|e| ServerError::db("select active rent failed", e))
}

/// Active open-ended rents that started strictly before `cutoff`.
pub fn find_expired_open_ended(conn: &Connection, cutoff: i64) -> Result<Vec<Rent>, ServerError> {
    query_rents(
        conn,
        &format!(
            "select {RENT_COLUMNS} from rents
             where active = 1 and end_time is null and start_time < ?
             order by start_time, id"
        ),
        params![cutoff],
    )
}

/// Rent history for a user, newest first.
pub fn list_rents_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Rent>, ServerError> {
    query_rents(
        conn,
        &format!("select {RENT_COLUMNS} from rents where user_id = ? order by start_time desc, id desc"),
        params![user_id],
    )
}

/// Persists the mutable part of a rent (its `active` flag).
///
/// The schema rejects reactivation and any change to the rent's terms.
pub fn save_rent(conn: &Connection, rent: &Rent) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update rents set active = ? where id = ?",
            params![rent.active, rent.id],
        )
        .map_err(|e| ServerError::db("update rent failed", e))?;

    if updated != 1 {
        return Err(ServerError::NotFound(format!("rent {} not found", rent.id)));
    }
    Ok(())
}
