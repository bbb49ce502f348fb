// src/engine/mod.rs
//! Rent lifecycle: booking, cancellation and expiry of open-ended rents.
//!
//! Every mutation runs in a single SQLite write transaction; listeners are
//! notified only after that transaction commits.
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::db::connection::Database;
use crate::db::rents;
use crate::domain::rent::Rent;
use crate::errors::ServerError;
use crate::notify::{notify_best_effort, AvailabilityNotifier};

pub mod booking;
pub mod cancellation;
pub mod sweeper;

use booking::BookingRequest;

#[derive(Clone)]
pub struct RentEngine {
    db: Database,
    notifier: Arc<dyn AvailabilityNotifier>,
}

impl RentEngine {
    pub fn new(db: Database, notifier: Arc<dyn AvailabilityNotifier>) -> Self {
        Self { db, notifier }
    }

    pub fn book(&self, req: BookingRequest, now: i64) -> Result<Rent, ServerError> {
        let rent = self.db.with_conn(|conn| booking::book(conn, &req, now))?;
        info!(
            rent_id = rent.id,
            spot_id = rent.spot_id,
            user_id = rent.user_id,
            open_ended = rent.is_open_ended(),
            total_price = %rent.total_price,
            "spot booked"
        );

        notify_best_effort(self.notifier.as_ref());
        Ok(rent)
    }

    pub fn cancel(&self, rent_id: i64, user_id: i64) -> Result<(), ServerError> {
        let rent = self
            .db
            .with_conn(|conn| cancellation::cancel(conn, rent_id, user_id))?;
        info!(rent_id, spot_id = rent.spot_id, user_id, "rent cancelled");

        notify_best_effort(self.notifier.as_ref());
        Ok(())
    }

    pub fn active_rent_for(&self, user_id: i64) -> Result<Option<Rent>, ServerError> {
        self.db
            .with_conn(|conn| rents::find_active_by_user(conn, user_id))
    }

    pub fn rent_history(&self, user_id: i64) -> Result<Vec<Rent>, ServerError> {
        self.db
            .with_conn(|conn| rents::list_rents_by_user(conn, user_id))
    }

    /// One sweep cycle. Never fails: errors are logged and the next cycle retries.
    /// Returns how many rents were expired.
    pub fn expire_stale_rents(&self, now: i64, timeout: Duration) -> usize {
        let timeout_secs = i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX);
        let cutoff = now.saturating_sub(timeout_secs);

        match self.db.with_conn(|conn| sweeper::sweep(conn, cutoff)) {
            Ok(expired) if expired.is_empty() => 0,
            Ok(expired) => {
                info!(count = expired.len(), cutoff, "expired open-ended rents");
                for rent in &expired {
                    info!(rent_id = rent.rent_id, spot_id = rent.spot_id, "rent expired");
                }
                notify_best_effort(self.notifier.as_ref());
                expired.len()
            }
            Err(err) => {
                error!(error = %err, cutoff, "rent sweep failed");
                0
            }
        }
    }
}
