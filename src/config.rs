use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.500px.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub consumer_key: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str, consumer_key: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid API base URL {}: {}", base_url, e))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "API base URL cannot carry a path: {}",
            base_url
        );
        Ok(Self {
            base_url,
            consumer_key: consumer_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `PHOTOMANIA_API_URL` (optional) and `PHOTOMANIA_CONSUMER_KEY`.
    pub fn from_env() -> anyhow::Result<Self> {
        let base = std::env::var("PHOTOMANIA_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let key = std::env::var("PHOTOMANIA_CONSUMER_KEY")
            .map_err(|_| anyhow::anyhow!("PHOTOMANIA_CONSUMER_KEY is not set"))?;
        Self::new(&base, &key)
    }
}
