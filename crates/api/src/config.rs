use chrono::FixedOffset;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Progression engine settings.
    pub rpg: RpgConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            rpg: RpgConfig::from_env(),
        }
    }
}

/// Settings for the progression engine.
#[derive(Debug, Clone, Copy)]
pub struct RpgConfig {
    /// Offset whose local midnight separates streak days.
    pub streak_offset: FixedOffset,
}

/// Largest accepted `|STREAK_UTC_OFFSET_MINUTES|`; chrono rejects a full day.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

impl RpgConfig {
    /// Load from the environment.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `STREAK_UTC_OFFSET_MINUTES` | `0`     |
    ///
    /// Offsets beyond one day of UTC are clamped to +/-1439 minutes.
    ///
    /// # Panics
    ///
    /// Panics if the offset is not an integer.
    pub fn from_env() -> Self {
        let raw = std::env::var("STREAK_UTC_OFFSET_MINUTES").unwrap_or_else(|_| "0".into());
        Self::from_offset_var(&raw)
    }

    fn from_offset_var(raw: &str) -> Self {
        let minutes: i32 = raw
            .trim()
            .parse()
            .expect("STREAK_UTC_OFFSET_MINUTES must be a valid i32");
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            tracing::warn!(
                minutes,
                max = MAX_OFFSET_MINUTES,
                "STREAK_UTC_OFFSET_MINUTES out of range, clamping"
            );
        }

        Self::with_offset_minutes(minutes)
    }

    /// Build a config from an offset in minutes, clamped to one day either side.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let seconds = minutes.clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES) * 60;
        let streak_offset =
            FixedOffset::east_opt(seconds).expect("clamped offset is within one day");
        Self { streak_offset }
    }
}

impl Default for RpgConfig {
    fn default() -> Self {
        Self::with_offset_minutes(0)
    }
}
