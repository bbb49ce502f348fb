// src/config.rs
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::auth::accounts::DEFAULT_SESSION_TTL_SECS;
use crate::engine::sweeper::SweeperConfig;

/// Upper bound for every seconds-valued setting; keeps timestamp math in `i64`.
pub const MAX_DURATION_SECS: u64 = 60 * 60 * 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub schema_path: String,
    pub addr: SocketAddr,
    pub workers: usize,
    pub sweep_interval: Duration,
    pub rent_timeout: Duration,
    pub session_ttl_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sweep_interval_secs: u64 = parse_or(&lookup, "PARKING_SWEEP_INTERVAL_SECS", 30)?;
        let rent_timeout_secs: u64 = parse_or(&lookup, "PARKING_RENT_TIMEOUT_SECS", 30 * 60)?;
        let workers: usize = parse_or(&lookup, "PARKING_WORKERS", 8)?;
        let session_ttl_secs: i64 =
            parse_or(&lookup, "PARKING_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;

        check_secs("PARKING_SWEEP_INTERVAL_SECS", sweep_interval_secs)?;
        check_secs("PARKING_RENT_TIMEOUT_SECS", rent_timeout_secs)?;
        if workers == 0 {
            return Err(invalid("PARKING_WORKERS", "0", "must be positive"));
        }
        if session_ttl_secs <= 0 || session_ttl_secs as u64 > MAX_DURATION_SECS {
            return Err(invalid(
                "PARKING_SESSION_TTL_SECS",
                &session_ttl_secs.to_string(),
                &format!("must be between 1 and {MAX_DURATION_SECS}"),
            ));
        }

        Ok(Self {
            db_path: lookup("PARKING_DB_PATH").unwrap_or_else(|| "parking.sqlite3".into()),
            schema_path: lookup("PARKING_SCHEMA_PATH").unwrap_or_else(|| "sql/schema.sql".into()),
            addr: parse_or(&lookup, "PARKING_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            workers,
            sweep_interval: Duration::from_secs(sweep_interval_secs),
            rent_timeout: Duration::from_secs(rent_timeout_secs),
            session_ttl_secs,
        })
    }

    /// Long-poll listeners allowed to park at once; the rest of the
    /// workers stay free for bookings and cancellations.
    pub fn max_change_listeners(&self) -> usize {
        (self.workers / 2).max(1)
    }

    pub fn sweeper(&self) -> SweeperConfig {
        SweeperConfig {
            interval: self.sweep_interval,
            rent_timeout: self.rent_timeout,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
    }
}

fn check_secs(key: &'static str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 || secs > MAX_DURATION_SECS {
        return Err(invalid(
            key,
            &secs.to_string(),
            &format!("must be between 1 and {MAX_DURATION_SECS}"),
        ));
    }
    Ok(())
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
