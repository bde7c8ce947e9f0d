use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fitquest_db::DbPool,
    /// Server configuration (read by middleware and handlers).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Day-boundary offset for streak calculations.
    pub fn streak_offset(&self) -> FixedOffset {
        self.config.rpg.streak_offset
    }
}
