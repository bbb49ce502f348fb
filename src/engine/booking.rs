// src/engine/booking.rs
use rusqlite::{Connection, TransactionBehavior};

use crate::db::{rents, spots};
use crate::domain::payment::PaymentStatus;
use crate::domain::pricing::total_price;
use crate::domain::rent::{NewRent, Rent};
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy)]
pub struct BookingRequest {
    pub spot_id: i64,
    /// Identity resolved by the caller; trusted as-is.
    pub user_id: i64,
    /// `None` books an open-ended "rent now" session.
    pub end_time: Option<i64>,
}

/// Books a spot for a user in one write transaction.
///
/// Steps: load the spot, refuse if taken, claim it with a guarded update,
/// write the rent with a price snapshot, commit. Any error drops the
/// transaction, which rolls back the claim.
pub fn book(conn: &mut Connection, req: &BookingRequest, now: i64) -> Result<Rent, ServerError> {
    if let Some(end) = req.end_time {
        if end <= now {
            return Err(ServerError::BadRequest("end time must be in the future".into()));
        }
    }

    // IMMEDIATE takes the write lock up front, so concurrent bookers queue here
    // and the loser reads `available = 0` after the winner commits.
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::db("begin tx failed", e))?;

    let spot = spots::get_spot(&tx, req.spot_id)?
        .ok_or_else(|| ServerError::NotFound(format!("parking spot {} not found", req.spot_id)))?;

    if !spot.available {
        return Err(ServerError::Conflict("parking spot is already rented".into()));
    }

    if !spots::claim_spot(&tx, spot.id)? {
        return Err(ServerError::Conflict("parking spot is already rented".into()));
    }

    let rent = rents::insert_rent(
        &tx,
        &NewRent {
            spot_id: spot.id,
            user_id: req.user_id,
            start_time: now,
            end_time: req.end_time,
            price_at_rent_time: spot.price_per_hour,
            total_price: total_price(spot.price_per_hour, now, req.end_time),
            payment_status: PaymentStatus::Paid,
        },
    )?;

    tx.commit()
        .map_err(|e| ServerError::db("commit tx failed", e))?;

    Ok(rent)
}
