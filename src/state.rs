use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::navigation::{Navigator, Signals};
use crate::session_store::SessionStore;

/// The portal's shared context, passed to every screen and flow.
#[derive(Clone)]
pub struct Portal {
    /// The client's configuration.
    pub config: Config,
    /// The tab-scoped session. Only the auth service and the protected fetcher write it.
    pub session: SessionStore,
    /// The HTTP client bound to the configured backend.
    pub client: ApiClient,
    /// Where redirects and session notices are sent.
    pub navigator: Navigator,
}

impl Portal {
    /// Creates a new `Portal`.
    ///
    /// # Arguments
    ///
    /// * `config` - The client's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Portal` and the receiver for its signals.
    pub fn new(config: &Config) -> Result<(Self, Signals)> {
        let session = SessionStore::new();
        let client = ApiClient::new(&config.api_base_url, session.clone())?;
        tracing::info!("✅ API client ready for {}", client.base_url());

        let (navigator, signals) = Navigator::channel();

        Ok((
            Portal {
                config: config.clone(),
                session,
                client,
                navigator,
            },
            signals,
        ))
    }
}
