//! API Configuration

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Storage key under which the bearer token is persisted
pub const DEFAULT_TOKEN_KEY: &str = "gramsaarthi_token";

/// Where the API lives and where the session token is kept
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,

    /// Client-local storage key for the bearer token
    pub token_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_key: DEFAULT_TOKEN_KEY.into(),
        }
    }

    /// Read `SAARTHI_API_BASE_URL` and `SAARTHI_TOKEN_KEY`
    pub fn from_env() -> Self {
        let base_url = std::env::var("SAARTHI_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let token_key = std::env::var("SAARTHI_TOKEN_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_KEY.into());

        Self {
            token_key,
            ..Self::new(base_url)
        }
    }

    #[must_use]
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    /// Join the base URL and an absolute API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
