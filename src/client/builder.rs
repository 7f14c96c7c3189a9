use crate::client::core::MotionClient;
use crate::client::policy::RetryPolicy;
use crate::config::ClientConfig;
use crate::context::{ClientContext, Credentials};
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`MotionClient`].
///
/// Starts from [`ClientConfig::default`]; use [`MotionClientBuilder::from_env`]
/// to honour the `MOTION_*` variables.
pub struct MotionClientBuilder {
    config: ClientConfig,
    context: Option<Arc<ClientContext>>,
    credentials: Option<Credentials>,
}

impl MotionClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            context: None,
            credentials: None,
        }
    }

    /// Start from [`ClientConfig::from_env`]; also picks up `MOTION_USER` / `MOTION_PASSWORD`.
    pub fn from_env() -> Self {
        let credentials = match (std::env::var("MOTION_USER"), std::env::var("MOTION_PASSWORD")) {
            (Ok(user), Ok(password)) if !user.is_empty() => Some(Credentials::new(user, password)),
            _ => None,
        };
        Self {
            config: ClientConfig::from_env(),
            context: None,
            credentials,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Daemon origin, e.g. `http://raspberrypi.local:8080`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Per-attempt timeout. Zero is ignored.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.config.timeout = timeout;
        }
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.config.retry_base_delay = delay;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Share token, credentials and auth events with other clients or the application.
    pub fn context(mut self, context: Arc<ClientContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Attach HTTP Basic credentials to every request.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MotionClient> {
        let transport = Arc::new(HttpTransport::new(&self.config)?);
        let context = self.context.unwrap_or_else(ClientContext::shared);
        if let Some(credentials) = self.credentials {
            context.set_credentials(credentials);
        }

        Ok(MotionClient {
            policy: RetryPolicy::from_config(&self.config),
            config: self.config,
            transport,
            context,
        })
    }
}

impl Default for MotionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
