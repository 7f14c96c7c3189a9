//! Resilient client for the Motion daemon's REST API.
//!
//! Keep the public surface small: four verbs plus typed variants. Timeout,
//! transient retry and CSRF recovery live in the submodules under `src/client/`.

pub mod builder;
pub mod core;
mod execution;
mod policy;
pub mod request;

pub use builder::MotionClientBuilder;
pub use self::core::MotionClient;
pub use request::{Method, RequestDescriptor};

pub(crate) use execution::parse_body;
