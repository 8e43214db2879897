use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub github_token: String,
    pub webhook_secret: String,
    pub github_api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing. Every missing required variable is
    /// reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_token = read("GITHUB_TOKEN");
        let webhook_secret = read("WEBHOOK_SECRET");

        let missing: Vec<&'static str> = [
            ("GITHUB_TOKEN", github_token.is_none()),
            ("WEBHOOK_SECRET", webhook_secret.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(github_token), Some(webhook_secret)) = (github_token, webhook_secret) else {
            return Err(ConfigError::MissingVariables(missing));
        };

        Ok(Config {
            host: read("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: read("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            github_token,
            webhook_secret,
            github_api_url: read("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            request_timeout: Duration::from_secs(
                read("GITHUB_REQUEST_TIMEOUT_SECS")
                    .and_then(|s| s.trim().parse().ok())
                    .filter(|secs: &u64| *secs > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
}
