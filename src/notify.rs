// src/notify.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("change feed lock poisoned")]
    Poisoned,
    #[error("notification failed: {0}")]
    Other(String),
}

/// Post-commit signal that some spot's availability changed.
///
/// The signal carries no payload; listeners re-fetch the spot list.
pub trait AvailabilityNotifier: Send + Sync {
    fn notify_availability_changed(&self) -> Result<(), NotifyError>;
}

/// Fires the signal and swallows any failure after logging it.
/// The state change being announced is already committed.
pub fn notify_best_effort(notifier: &dyn AvailabilityNotifier) {
    if let Err(err) = notifier.notify_availability_changed() {
        warn!(error = %err, "availability notification failed");
    }
}

/// In-process broadcast of availability changes.
///
/// Every change bumps a version counter and wakes all waiters. Clients
/// long-poll with the last version they saw. At most `max_waiters` callers
/// block at once; any beyond that get the current version immediately.
#[derive(Debug)]
pub struct ChangeFeed {
    version: Mutex<u64>,
    changed: Condvar,
    waiting: AtomicUsize,
    max_waiters: usize,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::with_max_waiters(usize::MAX)
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_waiters(max_waiters: usize) -> Self {
        Self {
            version: Mutex::new(0),
            changed: Condvar::new(),
            waiting: AtomicUsize::new(0),
            max_waiters,
        }
    }

    /// Callers currently parked in `wait_for_change`.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> u64 {
        self.version.lock().map(|v| *v).unwrap_or_else(|p| *p.into_inner())
    }

    /// Blocks until the version moves past `after` or `timeout` elapses,
    /// then returns the current version. Returns at once when the waiter
    /// limit is reached.
    pub fn wait_for_change(&self, after: u64, timeout: Duration) -> u64 {
        let admitted = self
            .waiting
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.max_waiters).then_some(n + 1)
            })
            .is_ok();
        if !admitted {
            debug!(max_waiters = self.max_waiters, "change feed full, not parking waiter");
            return self.current();
        }
        let _slot = WaiterSlot(&self.waiting);

        let deadline = Instant::now() + timeout;
        let mut version = match self.version.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        while *version <= after {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            version = match self.changed.wait_timeout(version, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        *version
    }
}

struct WaiterSlot<'a>(&'a AtomicUsize);

impl Drop for WaiterSlot<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AvailabilityNotifier for ChangeFeed {
    fn notify_availability_changed(&self) -> Result<(), NotifyError> {
        let mut version = self.version.lock().map_err(|_| NotifyError::Poisoned)?;
        *version += 1;
        debug!(version = *version, "parking spots updated");
        self.changed.notify_all();
        Ok(())
    }
}
