// src/engine/sweeper.rs
use rusqlite::{Connection, TransactionBehavior};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

use crate::db::{rents, spots};
use crate::domain::time::now_unix;
use crate::engine::RentEngine;
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiredRent {
    pub rent_id: i64,
    pub spot_id: i64,
    /// False when the rent pointed at a spot that no longer exists.
    pub spot_freed: bool,
}

/// Expires every open-ended active rent that started before `cutoff`.
///
/// All candidates are deactivated in one transaction; an error rolls back the
/// whole cycle and the next cycle sees the same candidates again.
pub fn sweep(conn: &mut Connection, cutoff: i64) -> Result<Vec<ExpiredRent>, ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::db("begin sweep tx failed", e))?;

    let candidates = rents::find_expired_open_ended(&tx, cutoff)?;
    let mut expired = Vec::with_capacity(candidates.len());

    for mut rent in candidates {
        rent.active = false;
        rents::save_rent(&tx, &rent)?;

        let spot_freed = spots::set_availability(&tx, rent.spot_id, true)?;
        if !spot_freed {
            warn!(rent_id = rent.id, spot_id = rent.spot_id, "expired rent references a missing spot");
        }
        expired.push(ExpiredRent {
            rent_id: rent.id,
            spot_id: rent.spot_id,
            spot_freed,
        });
    }

    tx.commit()
        .map_err(|e| ServerError::db("commit sweep tx failed", e))?;

    Ok(expired)
}

#[derive(Debug, Clone, Copy)]
pub struct SweeperConfig {
    /// Pause between sweep cycles.
    pub interval: Duration,
    /// Age after which an open-ended rent is expired.
    pub rent_timeout: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            rent_timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// Handle to the background sweep thread.
pub struct SweeperHandle {
    stop_tx: mpsc::Sender<()>,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the loop to exit and waits for the current cycle to finish.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        if self.join.join().is_err() {
            warn!("rent sweeper thread panicked");
        }
    }
}

/// Starts the periodic sweep on its own thread.
pub fn spawn_sweeper(engine: RentEngine, cfg: SweeperConfig) -> std::io::Result<SweeperHandle> {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let join = thread::Builder::new()
        .name("rent-sweeper".into())
        .spawn(move || {
            info!(
                interval_secs = cfg.interval.as_secs(),
                timeout_secs = cfg.rent_timeout.as_secs(),
                "rent sweeper started"
            );
            loop {
                match stop_rx.recv_timeout(cfg.interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        engine.expire_stale_rents(now_unix(), cfg.rent_timeout);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("rent sweeper stopped");
        })?;

    Ok(SweeperHandle { stop_tx, join })
}
