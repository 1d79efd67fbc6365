//! Client configuration

/// Connection settings for the seating backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Session token, sent as the `token` cookie
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Read `SEATING_API_URL`, `SEATING_API_TOKEN` and
    /// `SEATING_API_TIMEOUT_SECS`, falling back to the defaults
    pub fn from_env() -> Self {
        let mut config = std::env::var("SEATING_API_URL")
            .map(Self::new)
            .unwrap_or_default();
        if let Ok(token) = std::env::var("SEATING_API_TOKEN") {
            config.token = Some(token);
        }
        if let Some(timeout) = std::env::var("SEATING_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        config
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
