//! Per-session client state shared between the client and the application.
//!
//! A [`ClientContext`] holds exactly one CSRF token slot, one optional set of
//! Basic credentials, and the broadcast channel on which authentication
//! failures are announced. Clients built from the same context share all three.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Auth events buffered per subscriber before the oldest are dropped.
const AUTH_EVENT_CAPACITY: usize = 16;

/// Published when the daemon demands authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthEvent {
    /// 401, or 403 when a CSRF replay was rejected.
    pub status: u16,
}

/// HTTP Basic credentials for the daemon's `webcontrol_authentication`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct ClientContext {
    csrf_token: ArcSwapOption<String>,
    credentials: ArcSwapOption<Credentials>,
    auth_events: broadcast::Sender<AuthEvent>,
}

impl ClientContext {
    pub fn new() -> Self {
        let (auth_events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            csrf_token: ArcSwapOption::empty(),
            credentials: ArcSwapOption::empty(),
            auth_events,
        }
    }

    /// Convenience constructor for the common shared case.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The currently cached token, if any.
    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token.load_full().map(|t| t.as_ref().clone())
    }

    /// Replace the cached token. An empty token clears the slot.
    pub fn set_csrf_token(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            self.invalidate_csrf_token();
        } else {
            self.csrf_token.store(Some(Arc::new(token)));
        }
    }

    pub fn invalidate_csrf_token(&self) {
        self.csrf_token.store(None);
    }

    pub fn credentials(&self) -> Option<Arc<Credentials>> {
        self.credentials.load_full()
    }

    pub fn set_credentials(&self, credentials: Credentials) {
        self.credentials.store(Some(Arc::new(credentials)));
    }

    pub fn clear_credentials(&self) {
        self.credentials.store(None);
    }

    /// Subscribe to authentication failures. Only events sent after this call are received.
    pub fn subscribe_auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_events.subscribe()
    }

    pub(crate) fn notify_auth_error(&self, status: u16) {
        // Sending only fails when nobody is listening.
        if self.auth_events.send(AuthEvent { status }).is_err() {
            debug!(status, "auth event dropped: no subscribers");
        }
    }
}

impl Default for ClientContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("has_csrf_token", &self.csrf_token.load().is_some())
            .field("credentials", &self.credentials())
            .field("auth_subscribers", &self.auth_events.receiver_count())
            .finish()
    }
}
