//! Endpoint paths of the daemon API.
//!
//! Camera-scoped paths take the camera's device id; `0` addresses the daemon itself.

use url::form_urlencoded;

/// Full configuration, including the current `csrf_token`.
pub const CONFIG: &str = "/0/api/config";
pub const CAMERAS: &str = "/0/api/cameras";
pub const TEMPERATURE: &str = "/0/api/system/temperature";
pub const SYSTEM_STATUS: &str = "/0/api/system/status";
pub const AUTH_ME: &str = "/0/api/auth/me";
pub const REBOOT: &str = "/0/api/system/reboot";
pub const SHUTDOWN: &str = "/0/api/system/shutdown";

pub fn pictures(cam: u32) -> String {
    format!("/{}/api/media/pictures", cam)
}

pub fn movies(cam: u32) -> String {
    format!("/{}/api/media/movies", cam)
}

pub fn picture(cam: u32, id: u64) -> String {
    format!("/{}/api/media/picture/{}", cam, id)
}

pub fn movie(cam: u32, id: u64) -> String {
    format!("/{}/api/media/movie/{}", cam, id)
}

/// Batch config update; the body holds the changed parameters.
pub fn config_patch(cam: u32) -> String {
    format!("/{}/api/config", cam)
}

/// Single-parameter update. The daemon reads the parameter from the query string.
pub fn config_set(cam: u32, param: &str, value: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair(param, value)
        .finish();
    format!("/{}/config/set?{}", cam, query)
}
