use std::time::Duration;

/// Engine configuration
///
/// # Environment Variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SEATING_IDLE_FLUSH_MS | 5000 | Quiet period before an automatic flush |
/// | SEATING_NOTICE_CAPACITY | 64 | Notification channel capacity |
/// | LOG_LEVEL | info | Default tracing level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (unset) | Directory for rolling log files |
///
/// # Example
///
/// ```ignore
/// SEATING_IDLE_FLUSH_MS=2000 LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Idle timeout in milliseconds
    pub idle_flush_ms: u64,
    /// Broadcast capacity for user notices
    pub notice_capacity: usize,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl EngineConfig {
    /// Read the configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            idle_flush_ms: std::env::var("SEATING_IDLE_FLUSH_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            notice_capacity: std::env::var("SEATING_NOTICE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Load `.env` (if present) and then read the environment
    pub fn load() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_env()
    }

    /// Override the idle timeout, mostly for tests
    pub fn with_idle_flush_ms(mut self, ms: u64) -> Self {
        self.idle_flush_ms = ms;
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_flush_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            idle_flush_ms: 5000,
            notice_capacity: 64,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}
