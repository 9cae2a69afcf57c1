use std::env;
use std::time::Duration;
use anyhow::{Context, Result};

/// The backend used when `PORTAL_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Debounce window of the dashboard search box.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
/// Delay between a successful registration and the redirect to login.
pub const DEFAULT_REGISTER_REDIRECT_MS: u64 = 2000;

/// The portal client's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The base URL every API path is appended to.
    pub api_base_url: String,
    /// Debounce window for typeahead search. `None` searches on every keystroke.
    pub search_debounce: Option<Duration>,
    /// How long the confirmation message stays up before redirecting to login.
    pub register_redirect_delay: Duration,
}

impl Config {
    /// Creates a `Config` pointing at `api_base_url` with default timings.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            search_debounce: Some(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS)),
            register_redirect_delay: Duration::from_millis(DEFAULT_REGISTER_REDIRECT_MS),
        }
    }

    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("PORTAL_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("PORTAL_API_URL must be an http(s) URL, got {}", api_base_url);
        }

        let debounce_ms: u64 = env::var("PORTAL_SEARCH_DEBOUNCE_MS")
            .unwrap_or_else(|_| DEFAULT_SEARCH_DEBOUNCE_MS.to_string())
            .parse()
            .context("Invalid PORTAL_SEARCH_DEBOUNCE_MS")?;

        let redirect_ms: u64 = env::var("PORTAL_REGISTER_REDIRECT_MS")
            .unwrap_or_else(|_| DEFAULT_REGISTER_REDIRECT_MS.to_string())
            .parse()
            .context("Invalid PORTAL_REGISTER_REDIRECT_MS")?;

        Ok(Self {
            search_debounce: (debounce_ms > 0).then(|| Duration::from_millis(debounce_ms)),
            register_redirect_delay: Duration::from_millis(redirect_ms),
            ..Self::new(api_base_url)
        })
    }

    /// Switches typeahead search to fire on every keystroke.
    pub fn with_immediate_search(mut self) -> Self {
        self.search_debounce = None;
        self
    }

    /// Overrides the post-registration redirect delay.
    pub fn with_register_redirect_delay(mut self, delay: Duration) -> Self {
        self.register_redirect_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = Config::new("http://localhost:8080/api/");
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.search_debounce, Some(Duration::from_millis(300)));
        assert_eq!(config.register_redirect_delay, Duration::from_secs(2));
    }

    #[test]
    fn immediate_search_clears_debounce() {
        let config = Config::new(DEFAULT_API_URL).with_immediate_search();
        assert!(config.search_debounce.is_none());
    }
}
