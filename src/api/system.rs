//! Cameras and host system actions.

use super::endpoints;
use super::types::{Camera, CamerasResponse, PowerResult, SystemStatus, Temperature};
use super::daemon_result;
use crate::{MotionClient, Result};
use serde_json::json;

impl MotionClient {
    pub async fn cameras(&self) -> Result<Vec<Camera>> {
        let value = self.get(endpoints::CAMERAS).await?;
        Ok(daemon_result::<CamerasResponse>(value)?.cameras)
    }

    /// CPU temperature. Hosts without a thermal zone report a daemon error.
    pub async fn temperature(&self) -> Result<Temperature> {
        daemon_result(self.get(endpoints::TEMPERATURE).await?)
    }

    pub async fn system_status(&self) -> Result<SystemStatus> {
        daemon_result(self.get(endpoints::SYSTEM_STATUS).await?)
    }

    /// Reboot the host. Requires `webcontrol_actions power=on` on the daemon.
    pub async fn reboot(&self) -> Result<PowerResult> {
        daemon_result(self.post(endpoints::REBOOT, &json!({})).await?)
    }

    /// Power off the host. Requires `webcontrol_actions power=on` on the daemon.
    pub async fn shutdown(&self) -> Result<PowerResult> {
        daemon_result(self.post(endpoints::SHUTDOWN, &json!({})).await?)
    }
}
