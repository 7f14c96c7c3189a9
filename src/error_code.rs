//! 状态码映射：HTTP 状态码到面向用户的提示文本。
//!
//! HTTP status codes with console-defined meaning.
//!
//! Every error the client produces may carry an HTTP status. The statuses listed
//! here have a fixed user-facing message; anything else falls back to the
//! developer message of the error itself.
//!
//! | Status | Code                  | Retried |
//! |--------|-----------------------|---------|
//! | 400    | `InvalidRequest`      | no      |
//! | 401    | `Authentication`      | no      |
//! | 403    | `PermissionDenied`    | no      |
//! | 404    | `NotFound`            | no      |
//! | 408    | `Timeout`             | no      |
//! | 500    | `ServerError`         | no      |
//! | 502    | `BadGateway`          | once    |
//! | 503    | `ServiceUnavailable`  | once    |
//! | 504    | `GatewayTimeout`      | once    |
//!
//! ## Example
//!
//! ```rust
//! use motion_console::error_code::StatusCode;
//!
//! let code = StatusCode::from_http_status(503).unwrap();
//! assert_eq!(code.name(), "service_unavailable");
//! assert!(code.retryable());
//! assert!(StatusCode::from_http_status(418).is_none());
//! ```

use std::fmt;

/// An HTTP status with a mapped user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 400: malformed request or invalid parameter
    InvalidRequest,
    /// 401: daemon requires credentials
    Authentication,
    /// 403: credentials or CSRF token rejected
    PermissionDenied,
    /// 404: camera, media item or endpoint does not exist
    NotFound,
    /// 408: synthesized locally when the request timeout fires
    Timeout,
    /// 500: daemon internal error
    ServerError,
    /// 502: proxy in front of the daemon could not reach it
    BadGateway,
    /// 503: daemon temporarily unavailable
    ServiceUnavailable,
    /// 504: proxy timed out waiting for the daemon
    GatewayTimeout,
}

impl StatusCode {
    pub const ALL: [StatusCode; 9] = [
        Self::InvalidRequest,
        Self::Authentication,
        Self::PermissionDenied,
        Self::NotFound,
        Self::Timeout,
        Self::ServerError,
        Self::BadGateway,
        Self::ServiceUnavailable,
        Self::GatewayTimeout,
    ];

    /// HTTP statuses whose code is [`retryable`](Self::retryable).
    /// Default for [`ClientConfig::retryable_statuses`](crate::ClientConfig::retryable_statuses).
    pub fn retryable_statuses() -> Vec<u16> {
        Self::ALL
            .iter()
            .filter(|code| code.retryable())
            .map(|code| code.status())
            .collect()
    }

    /// Maps an HTTP status to its code, if it has one.
    pub fn from_http_status(status: u16) -> Option<Self> {
        let code = match status {
            400 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 => Self::Timeout,
            500 => Self::ServerError,
            502 => Self::BadGateway,
            503 => Self::ServiceUnavailable,
            504 => Self::GatewayTimeout,
            _ => return None,
        };
        Some(code)
    }

    /// Returns the numeric HTTP status.
    #[inline]
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::Authentication => 401,
            Self::PermissionDenied => 403,
            Self::NotFound => 404,
            Self::Timeout => 408,
            Self::ServerError => 500,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
        }
    }

    /// Returns the snake_case name (e.g., `"not_found"`), used in log fields.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::Timeout => "timeout",
            Self::ServerError => "server_error",
            Self::BadGateway => "bad_gateway",
            Self::ServiceUnavailable => "service_unavailable",
            Self::GatewayTimeout => "gateway_timeout",
        }
    }

    /// Text suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request. Please check your input.",
            Self::Authentication => "Authentication required. Please log in.",
            Self::PermissionDenied => "Access denied. You do not have permission for this action.",
            Self::NotFound => "The requested resource was not found.",
            Self::Timeout => "Request timed out. Please try again.",
            Self::ServerError => "Server error. Please try again later.",
            Self::BadGateway => "Bad gateway. The camera server is unreachable.",
            Self::ServiceUnavailable => "Service unavailable. The camera server is busy or restarting.",
            Self::GatewayTimeout => "Gateway timeout. The camera server took too long to respond.",
        }
    }

    /// Whether a response with this status is retried once by the client.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::BadGateway | Self::ServiceUnavailable | Self::GatewayTimeout
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_round_trips_its_status() {
        for code in StatusCode::ALL {
            assert_eq!(StatusCode::from_http_status(code.status()), Some(code));
        }
    }

    #[test]
    fn test_retryable_statuses_are_the_gateway_family() {
        assert_eq!(StatusCode::retryable_statuses(), vec![502, 503, 504]);
    }

    #[test]
    fn test_unmapped_statuses() {
        for status in [200u16, 301, 409, 418, 429, 501] {
            assert!(StatusCode::from_http_status(status).is_none(), "{status}");
        }
    }

    #[test]
    fn test_gateway_statuses_have_distinct_wording() {
        let messages: Vec<&str> = [500u16, 502, 503, 504]
            .iter()
            .filter_map(|s| StatusCode::from_http_status(*s))
            .map(|c| c.user_message())
            .collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_only_gateway_family_is_retryable() {
        assert!(StatusCode::BadGateway.retryable());
        assert!(StatusCode::ServiceUnavailable.retryable());
        assert!(StatusCode::GatewayTimeout.retryable());
        assert!(!StatusCode::ServerError.retryable());
        assert!(!StatusCode::Timeout.retryable());
        assert!(!StatusCode::Authentication.retryable());
    }
}
