use crate::app::App;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::engine::sweeper::spawn_sweeper;
use crate::notify::ChangeFeed;
use crate::responses::error_to_response;
use crate::router::handle;
use anyhow::Context;
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod auth;
mod config;
mod db;
mod domain;
mod engine;
mod errors;
mod handlers;
mod notify;
mod requests;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = Database::new(config.db_path.clone());
    init_db(&db, &config.schema_path).context("database initialization failed")?;

    let feed = Arc::new(ChangeFeed::with_max_waiters(config.max_change_listeners()));
    let app = App::new(db, feed, &config);

    // The sweeper shares the engine (and its notifier) with the request path.
    let sweeper = spawn_sweeper(app.engine.clone(), config.sweeper())
        .context("failed to start rent sweeper")?;

    info!(addr = %config.addr, workers = config.workers, "starting server");
    let server = Server::bind(&config.addr).max_workers(config.workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    sweeper.stop();

    if let Err(e) = &result {
        error!(error = %e, "server ended with error");
    }
    result.context("server ended with error")?;

    info!("server shut down cleanly");
    Ok(())
}

fn init_logger() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
