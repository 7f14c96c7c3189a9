use crate::client::builder::MotionClientBuilder;
use crate::client::policy::RetryPolicy;
use crate::client::request::{Method, RequestDescriptor};
use crate::config::ClientConfig;
use crate::context::ClientContext;
use crate::transport::HttpTransport;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Client for the Motion daemon's JSON API.
///
/// Cheap to clone; clones share the connection pool and the [`ClientContext`].
#[derive(Clone)]
pub struct MotionClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) context: Arc<ClientContext>,
    pub(crate) policy: RetryPolicy,
}

impl MotionClient {
    /// Client with default configuration for the given daemon origin.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        MotionClientBuilder::new().base_url(base_url).build()
    }

    pub fn builder() -> MotionClientBuilder {
        MotionClientBuilder::new()
    }

    /// Client-side settings; [`MotionClient::config`] fetches the daemon's configuration.
    pub fn client_config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn context(&self) -> &Arc<ClientContext> {
        &self.context
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url().as_str()
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.execute(RequestDescriptor::new(Method::Get, endpoint, None))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.execute(RequestDescriptor::new(Method::Post, endpoint, Some(body)))
            .await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.execute(RequestDescriptor::new(Method::Patch, endpoint, Some(body)))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.execute(RequestDescriptor::new(Method::Delete, endpoint, None))
            .await
    }

    /// `get`, deserialized into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.get(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `post`, deserialized into `T`.
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.post(endpoint, body).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for MotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionClient")
            .field("base_url", &self.base_url())
            .field("timeout", &self.config.timeout)
            .field("max_retries", &self.config.max_retries)
            .field("context", &self.context)
            .finish()
    }
}
