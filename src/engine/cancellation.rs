// src/engine/cancellation.rs
use rusqlite::{Connection, TransactionBehavior};
use tracing::warn;

use crate::db::{rents, spots};
use crate::domain::rent::Rent;
use crate::errors::ServerError;

/// Ends a user's own active rent and frees its spot in one transaction.
///
/// No refund is issued; the payment status is left as recorded.
/// Returns the deactivated rent.
pub fn cancel(conn: &mut Connection, rent_id: i64, user_id: i64) -> Result<Rent, ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::db("begin tx failed", e))?;

    let mut rent = rents::get_rent(&tx, rent_id)?
        .ok_or_else(|| ServerError::NotFound(format!("rent {rent_id} not found")))?;

    if rent.user_id != user_id {
        return Err(ServerError::Forbidden("you can only cancel your own rent".into()));
    }

    if !rent.active {
        return Err(ServerError::Conflict("rent is already inactive".into()));
    }

    rent.active = false;
    rents::save_rent(&tx, &rent)?;

    if !spots::set_availability(&tx, rent.spot_id, true)? {
        warn!(rent_id, spot_id = rent.spot_id, "cancelled rent references a missing spot");
    }

    tx.commit()
        .map_err(|e| ServerError::db("commit tx failed", e))?;

    Ok(rent)
}
