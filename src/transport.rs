//! HTTP transport: one network attempt against the daemon.

pub mod http;

pub use http::{HttpTransport, RawResponse};
