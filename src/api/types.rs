//! Payloads of the daemon API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `GET /0/api/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub version: String,
    /// Camera list as the daemon reports it (`count` plus one entry per index).
    #[serde(default)]
    pub cameras: Value,
    /// Parameter name to parameter detail.
    #[serde(default)]
    pub configuration: Map<String, Value>,
    #[serde(default)]
    pub categories: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub id: u32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CamerasResponse {
    pub cameras: Vec<Camera>,
}

/// A snapshot or movie file recorded by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub filename: String,
    pub path: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PicturesResponse {
    pub pictures: Vec<MediaItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MoviesResponse {
    pub movies: Vec<MediaItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uptime {
    pub seconds: u64,
    pub days: u64,
    pub hours: u64,
}

/// Memory or disk usage, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub percent: f64,
}

/// Response of `GET /0/api/system/status`. Sections the host cannot report are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub uptime: Option<Uptime>,
    #[serde(default)]
    pub memory: Option<Usage>,
    #[serde(default)]
    pub disk: Option<Usage>,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub auth_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
    pub deleted_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerResult {
    pub success: bool,
    pub operation: String,
    pub message: String,
}

/// Per-parameter outcome of a batch config update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigChange {
    pub param: String,
    #[serde(default)]
    pub old: String,
    #[serde(default)]
    pub new: String,
    #[serde(default)]
    pub unchanged: bool,
    #[serde(default)]
    pub hot_reload: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSummary {
    pub total: u32,
    pub success: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatchResult {
    pub status: String,
    #[serde(default)]
    pub applied: Vec<ConfigChange>,
    #[serde(default)]
    pub summary: PatchSummary,
}

impl ConfigPatchResult {
    /// Parameters the daemon refused, with its reason.
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &str)> {
        self.applied
            .iter()
            .filter_map(|c| c.error.as_deref().map(|e| (c.param.as_str(), e)))
    }
}
