//! Mock daemon setup shared by the integration tests.

#![allow(dead_code)]

use mockito::{Mock, Server, ServerGuard};
use motion_console::{ClientContext, MotionClient};
use std::sync::Arc;
use std::time::Duration;

/// Retry backoff used by test clients, short enough to keep tests fast.
pub const TEST_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Test fixture that manages a mock Motion daemon.
pub struct MockDaemon {
    pub server: ServerGuard,
    pub context: Arc<ClientContext>,
}

impl MockDaemon {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
            context: ClientContext::shared(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Client pointed at the mock server, sharing this fixture's context.
    pub fn client(&self) -> MotionClient {
        MotionClient::builder()
            .base_url(self.url())
            .context(self.context.clone())
            .retry_base_delay(TEST_RETRY_DELAY)
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client builds")
    }

    /// JSON response mock that must be hit exactly `hits` times.
    pub async fn mock_json(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: &str,
        hits: usize,
    ) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// `GET /0/api/config` handing out `token`.
    pub async fn mock_config_token(&mut self, token: &str, hits: usize) -> Mock {
        let body = format!(r#"{{"csrf_token":"{}","version":"5.0.0","cameras":{{"count":0}},"configuration":{{}},"categories":{{}}}}"#, token);
        self.mock_json("GET", "/0/api/config", 200, &body, hits)
            .await
    }
}
