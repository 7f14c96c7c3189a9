//! Typed operations over the Motion daemon API.
//!
//! Every operation goes through the resilient verbs on [`MotionClient`], so it
//! gets the timeout, transient retry and CSRF recovery for free.
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`auth`] | `auth_status`, `login`, `logout` |
//! | [`media`] | `pictures`, `movies`, `delete_picture`, `delete_movie` |
//! | [`settings`] | `config`, `set_config_param`, `patch_config` |
//! | [`system`] | `cameras`, `temperature`, `system_status`, `reboot`, `shutdown` |
//!
//! [`MotionClient`]: crate::MotionClient

pub mod auth;
pub mod endpoints;
pub mod media;
pub mod settings;
pub mod system;
pub mod types;

pub use types::*;

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a 2xx body, turning an in-band daemon error into [`Error::Daemon`].
///
/// The daemon reports some failures with status 200 and either
/// `{"error": "..."}` or `{"status": "error", "message": "..."}`.
pub(crate) fn daemon_result<T: DeserializeOwned>(value: Value) -> Result<T> {
    if let Some(message) = daemon_error(&value) {
        return Err(Error::daemon(message));
    }
    Ok(serde_json::from_value(value)?)
}

fn daemon_error(value: &Value) -> Option<String> {
    if let Some(err) = value.get("error").and_then(Value::as_str) {
        return Some(err.to_string());
    }
    if value.get("status").and_then(Value::as_str) == Some("error") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("daemon reported an error");
        return Some(message.to_string());
    }
    None
}
