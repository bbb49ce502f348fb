// src/domain/spot.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: i64,
    pub location: String,
    pub price_per_hour: Decimal,
    /// True while no active rent occupies the spot.
    pub available: bool,
}

/// Registration payload for a new spot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpot {
    pub location: String,
    pub price_per_hour: Decimal,
    #[serde(default)]
    pub available: Option<bool>,
}

impl NewSpot {
    /// Trims the location and rejects payloads that would break the
    /// availability invariant (a new spot has no rent, so it must be free).
    pub fn normalized(self) -> Result<NewSpot, ServerError> {
        let location = self.location.trim().to_string();
        if location.is_empty() {
            return Err(ServerError::BadRequest("location is required".into()));
        }
        if self.available == Some(false) {
            return Err(ServerError::BadRequest(
                "a new parking spot cannot start occupied".into(),
            ));
        }
        Ok(NewSpot {
            location,
            price_per_hour: self.price_per_hour,
            available: Some(true),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub price_per_hour: Decimal,
}
