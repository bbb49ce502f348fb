// src/domain/rent.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentStatus;
use crate::domain::time::{serialize_unix, serialize_unix_opt};

/// One rental occupancy of a spot by a user.
///
/// `spot_id`, `user_id`, the time window and both prices are fixed at
/// creation. Only `active` changes, and only from true to false.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rent {
    pub id: i64,
    pub spot_id: i64,
    pub user_id: i64,
    #[serde(serialize_with = "serialize_unix")]
    pub start_time: i64,
    /// `None` for an open-ended "rent now" session.
    #[serde(serialize_with = "serialize_unix_opt")]
    pub end_time: Option<i64>,
    pub active: bool,
    pub price_at_rent_time: Decimal,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
}

impl Rent {
    pub fn is_open_ended(&self) -> bool {
        self.end_time.is_none()
    }
}

/// A rent ready to be written; the ledger assigns the id.
#[derive(Debug, Clone)]
pub struct NewRent {
    pub spot_id: i64,
    pub user_id: i64,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub price_at_rent_time: Decimal,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
}

/// Optional body of a booking request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    /// RFC3339 deadline for a fixed-period rent.
    #[serde(default)]
    pub end_time: Option<String>,
}
