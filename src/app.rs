// src/app.rs
use std::sync::Arc;

use crate::auth::accounts::AccountService;
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::engine::RentEngine;
use crate::notify::ChangeFeed;

/// Everything a request handler needs, shared across astra workers.
pub struct App {
    pub db: Database,
    pub engine: RentEngine,
    pub feed: Arc<ChangeFeed>,
    pub accounts: AccountService,
}

impl App {
    pub fn new(db: Database, feed: Arc<ChangeFeed>, config: &AppConfig) -> Self {
        let engine = RentEngine::new(db.clone(), feed.clone());
        Self {
            db,
            engine,
            feed,
            accounts: AccountService::new(config.session_ttl_secs),
        }
    }
}
