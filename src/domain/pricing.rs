// src/domain/pricing.rs

use rust_decimal::Decimal;

pub const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Hours charged for a rent starting at `start`.
///
/// Open-ended rents and anything shorter than an hour are charged one hour;
/// partial hours round up.
pub fn billable_hours(start: i64, end: Option<i64>) -> i64 {
    let Some(end) = end else {
        return 1;
    };
    let secs = (end - start).max(0);
    let hours = (secs + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR;
    hours.max(1)
}

pub fn total_price(price_per_hour: Decimal, start: i64, end: Option<i64>) -> Decimal {
    price_per_hour * Decimal::from(billable_hours(start, end))
}
