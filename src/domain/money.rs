// src/domain/money.rs

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::ServerError;

/// Prices are stored as integer cents; the API speaks two-place decimals.
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts a positive amount with at most two decimal places into cents.
pub fn to_cents(amount: Decimal) -> Result<i64, ServerError> {
    if amount <= Decimal::ZERO {
        return Err(ServerError::BadRequest("price must be positive".into()));
    }
    if amount.round_dp(2) != amount {
        return Err(ServerError::BadRequest(
            "price must have at most two decimal places".into(),
        ));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| ServerError::BadRequest("price is out of range".into()))
}
