//! Daemon authentication (HTTP Basic/Digest via `webcontrol_authentication`).

use super::endpoints;
use super::types::AuthStatus;
use super::daemon_result;
use crate::client::Method;
use crate::context::Credentials;
use crate::{Error, MotionClient, Result};
use tracing::info;

impl MotionClient {
    /// Whether the daemon has authentication configured, and which method.
    pub async fn auth_status(&self) -> Result<AuthStatus> {
        daemon_result(self.get(endpoints::AUTH_ME).await?)
    }

    /// Verify credentials against the daemon and keep them for later requests.
    ///
    /// This probe bypasses retry and auth events: a rejection here is an
    /// answer to the login attempt, not a session failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthStatus> {
        let credentials = Credentials::new(username, password);
        let response = self
            .transport
            .execute(Method::Get, endpoints::AUTH_ME, None, None, Some(&credentials))
            .await?;

        match response.status {
            200..=299 => {
                let status = daemon_result(crate::client::parse_body(&response.body)?)?;
                self.context.set_credentials(credentials);
                info!(username, "motion-console login succeeded");
                Ok(status)
            }
            401 | 403 => Err(Error::Authentication {
                status: response.status,
                message: "Invalid username or password".to_string(),
            }),
            other => Err(Error::Http {
                status: other,
                message: format!("Authentication failed ({})", other),
            }),
        }
    }

    /// Forget stored credentials.
    pub fn logout(&self) {
        self.context.clear_credentials();
    }
}
