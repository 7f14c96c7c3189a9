use crate::error_code::StatusCode;
use thiserror::Error;

/// Message of the error produced when the client-side timeout fires.
pub const TIMEOUT_MESSAGE: &str = "Request timeout";
/// Message of the error produced for any 401 response.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";
/// Message of the error produced when CSRF recovery does not succeed.
pub const CSRF_FAILED_MESSAGE: &str = "CSRF validation failed";

/// Structured error context for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Configuration key that caused the error (e.g., "base_url", "proxy_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Fieldless mirror of [`Error`] for matching on the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    CsrfValidation,
    Timeout,
    Http,
    Network,
    Daemon,
    Configuration,
}

/// Error type for every call made through the client.
///
/// All variants share one shape as seen by callers: a developer-facing
/// [`message`](Error::message), an optional HTTP [`status`](Error::status) and a
/// derived [`user_message`](Error::user_message).
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// 401 from the daemon, or rejected login credentials.
    #[error("{message}")]
    Authentication { status: u16, message: String },

    /// A mutating request was rejected with 403 and token recovery did not succeed.
    #[error("{message}")]
    CsrfValidation { message: String },

    /// The client-side timeout fired before the response completed.
    #[error("{message}")]
    Timeout { message: String },

    /// Any other non-success HTTP status, including a transient status seen twice.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Connection, body read or JSON parse failure. Never carries a status.
    #[error("{message}")]
    Network { message: String },

    /// The daemon answered 2xx but reported an error in the body.
    #[error("{message}")]
    Daemon { message: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn timeout() -> Self {
        Error::Timeout {
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    pub fn authentication_required() -> Self {
        Error::Authentication {
            status: 401,
            message: AUTH_REQUIRED_MESSAGE.to_string(),
        }
    }

    pub fn csrf_validation() -> Self {
        Error::CsrfValidation {
            message: CSRF_FAILED_MESSAGE.to_string(),
        }
    }

    /// Generic failure in the `HTTP <status>: <statusText>` form, or
    /// `HTTP <status>` when the response carried no reason phrase.
    pub fn http(status: u16, status_text: &str) -> Self {
        let message = match status_text.trim() {
            "" => format!("HTTP {}", status),
            reason => format!("HTTP {}: {}", status, reason),
        };
        Error::Http { status, message }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network {
            message: msg.into(),
        }
    }

    pub fn daemon(msg: impl Into<String>) -> Self {
        Error::Daemon {
            message: msg.into(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::CsrfValidation { .. } => ErrorKind::CsrfValidation,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Http { .. } => ErrorKind::Http,
            Error::Network { .. } => ErrorKind::Network,
            Error::Daemon { .. } => ErrorKind::Daemon,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Developer-facing message.
    pub fn message(&self) -> &str {
        match self {
            Error::Authentication { message, .. }
            | Error::CsrfValidation { message }
            | Error::Timeout { message }
            | Error::Http { message, .. }
            | Error::Network { message }
            | Error::Daemon { message }
            | Error::Configuration { message, .. } => message,
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } | Error::Http { status, .. } => Some(*status),
            Error::CsrfValidation { .. } => Some(403),
            Error::Timeout { .. } => Some(408),
            Error::Network { .. } | Error::Daemon { .. } | Error::Configuration { .. } => None,
        }
    }

    /// Message for end users: the mapped text for known statuses, otherwise the raw message.
    pub fn user_message(&self) -> String {
        self.status()
            .and_then(StatusCode::from_http_status)
            .map(|code| code.user_message().to_string())
            .unwrap_or_else(|| self.message().to_string())
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::network(format!("Failed to parse response JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_shape() {
        let err = Error::timeout();
        assert_eq!(err.message(), "Request timeout");
        assert_eq!(err.status(), Some(408));
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.user_message(), "Request timed out. Please try again.");
    }

    #[test]
    fn test_http_message_format() {
        let err = Error::http(500, "Internal Server Error");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_http_message_without_reason_phrase() {
        assert_eq!(Error::http(599, "").message(), "HTTP 599");
        assert_eq!(Error::http(599, "  ").message(), "HTTP 599");
    }

    #[test]
    fn test_user_message_falls_back_for_unmapped_status() {
        let err = Error::http(418, "I'm a teapot");
        assert_eq!(err.user_message(), "HTTP 418: I'm a teapot");
    }

    #[test]
    fn test_user_message_falls_back_without_status() {
        let err = Error::network("connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn test_csrf_error_reports_access_denied() {
        let err = Error::csrf_validation();
        assert_eq!(err.message(), "CSRF validation failed");
        assert_eq!(err.status(), Some(403));
        assert!(err.user_message().starts_with("Access denied"));
    }

    #[test]
    fn test_configuration_display_includes_context() {
        let err = Error::configuration_with_context(
            "invalid base URL",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("client_builder"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid base URL (field: base_url, source: client_builder)"
        );
        assert!(err.context().is_some());
    }
}
