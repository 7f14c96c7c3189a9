//! Daemon configuration: read, single-parameter set, batch patch.

use super::endpoints;
use super::types::{ConfigPatchResult, MotionConfig};
use super::daemon_result;
use crate::{MotionClient, Result};
use serde_json::{json, Map, Value};

impl MotionClient {
    /// Fetch the full configuration and cache the CSRF token it carries.
    pub async fn config(&self) -> Result<MotionConfig> {
        let config: MotionConfig = daemon_result(self.get(endpoints::CONFIG).await?)?;
        if let Some(token) = config.csrf_token.as_deref().filter(|t| !t.is_empty()) {
            self.context.set_csrf_token(token);
        }
        Ok(config)
    }

    /// Set one parameter via `POST /{cam}/config/set?{param}={value}`.
    pub async fn set_config_param(&self, cam: u32, param: &str, value: &str) -> Result<Value> {
        let result = self
            .post(&endpoints::config_set(cam, param, value), &json!({}))
            .await?;
        daemon_result(result)
    }

    /// Apply several parameters at once. Per-parameter refusals are reported
    /// in [`ConfigPatchResult::applied`], not as an error.
    pub async fn patch_config(
        &self,
        cam: u32,
        changes: &Map<String, Value>,
    ) -> Result<ConfigPatchResult> {
        daemon_result(self.patch(&endpoints::config_patch(cam), changes).await?)
    }
}
