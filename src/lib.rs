//! # motion-console
//!
//! Motion 摄像头守护进程的弹性 API 客户端。
//!
//! Resilient API client for the Motion camera daemon's web control interface.
//!
//! ## Overview
//!
//! The daemon exposes a JSON REST API next to its MJPEG streams. This crate
//! wraps that API in a client that survives the failure modes a management
//! console actually hits: slow or hung requests, a proxy briefly reporting the
//! daemon as unavailable, CSRF tokens that went stale after a daemon restart,
//! and sessions that need (re-)authentication.
//!
//! ## Request contract
//!
//! - **Timeout**: each attempt is cancelled after 10 seconds and fails with status 408
//! - **CSRF**: `POST`/`PATCH`/`DELETE` carry the cached `X-CSRF-Token`; a 403
//!   invalidates it, fetches a fresh one from `/0/api/config` and replays once
//! - **Transient retry**: 502/503/504 are retried once after a linear backoff
//! - **Authentication**: 401 publishes an [`AuthEvent`] and fails without retry
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use motion_console::MotionClient;
//!
//! #[tokio::main]
//! async fn main() -> motion_console::Result<()> {
//!     let client = MotionClient::new("http://raspberrypi.local:8080")?;
//!
//!     let mut auth_events = client.context().subscribe_auth_events();
//!     tokio::spawn(async move {
//!         while let Ok(event) = auth_events.recv().await {
//!             eprintln!("login required (HTTP {})", event.status);
//!         }
//!     });
//!
//!     client.config().await?; // caches the CSRF token
//!     for cam in client.cameras().await? {
//!         let pictures = client.pictures(cam.id).await?;
//!         println!("{}: {} pictures", cam.name, pictures.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Resilient verbs, retry policy and CSRF recovery |
//! | [`api`] | Typed daemon operations and payloads |
//! | [`context`] | Shared CSRF token slot, credentials and auth events |
//! | [`config`] | Client configuration and environment overrides |
//! | [`transport`] | Single HTTP attempt with timeout |
//! | [`error_code`] | Status to user-facing message table |

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod error_code;
pub mod transport;

// Re-export main types for convenience
pub use client::{Method, MotionClient, MotionClientBuilder, RequestDescriptor};
pub use config::ClientConfig;
pub use context::{AuthEvent, ClientContext, Credentials};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
