use std::time::Duration;
use tracing::warn;

/// Connection settings for the upstream membership listing API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    /// Bearer credential. `None` sends no Authorization header at all.
    pub api_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub product_id: Option<String>,
    pub admin_user_ids: Vec<String>,
    pub request_timeout: Duration,
    pub development: bool,
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &str = "https://api.whop.com/api/v5";
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_blank("WHOP_API_KEY");
        if api_key.is_none() {
            warn!("WHOP_API_KEY not set, upstream membership requests will be rejected");
        }

        let product_id = non_blank("WHOP_PRODUCT_ID");
        if product_id.is_none() {
            warn!("WHOP_PRODUCT_ID not set, dashboards will show a configuration error");
        }

        let http_port = non_blank("ROSTER_HTTP_PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(Self::DEFAULT_HTTP_PORT);

        let timeout_secs = non_blank("ROSTER_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            host: non_blank("ROSTER_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port,
            api_base_url: non_blank("ROSTER_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| Self::DEFAULT_API_BASE_URL.to_string()),
            api_key,
            product_id,
            admin_user_ids: non_blank("ROSTER_ADMIN_USER_IDS")
                .map(|ids| {
                    ids.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            request_timeout: Duration::from_secs(timeout_secs),
            development: non_blank("ROSTER_ENV")
                .map(|env| env.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
        }
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}
