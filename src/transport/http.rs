use crate::client::Method;
use crate::config::ClientConfig;
use crate::context::Credentials;
use crate::{Error, ErrorContext, Result};
use hyper::ext::ReasonPhrase;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Proxy;
use std::time::Duration;
use url::Url;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Status line and body of a completed attempt, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        // The per-attempt timeout is enforced in `execute`, not by reqwest.
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_details(proxy_url.clone())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("failed to build HTTP client: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint (`/0/api/config`, `/1/config/set?x=1`) against the base URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| Error::network(format!("invalid endpoint {}: {}", endpoint, e)))
    }

    /// Send one request and read the whole body, racing the configured timeout.
    ///
    /// Non-success statuses are returned as `Ok`; only transport failures are errors.
    /// When the timeout wins, the in-flight request future is dropped.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        csrf_token: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> Result<RawResponse> {
        let url = self.resolve(endpoint)?;

        let mut request = self
            .client
            .request(method.to_reqwest(), url)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(creds.password()));
        }

        let attempt = async {
            let resp = request.send().await?;
            let status = resp.status();
            let status_text = reason_phrase(&resp).to_string();
            let body = resp.text().await?;
            Ok::<_, reqwest::Error>(RawResponse {
                status: status.as_u16(),
                status_text,
                body,
            })
        };

        match tokio::time::timeout(self.timeout, attempt).await {
            Err(_elapsed) => Err(Error::timeout()),
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if e.is_timeout() => Err(Error::timeout()),
            Ok(Err(e)) => Err(Error::network(e.to_string())),
        }
    }
}

/// Reason phrase the server sent, else the canonical one for the status, else empty.
fn reason_phrase(resp: &reqwest::Response) -> &str {
    resp.extensions()
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| resp.status().canonical_reason())
        .unwrap_or("")
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |details: String| {
        Error::configuration_with_context(
            "invalid base URL",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(details)
                .with_source("http_transport"),
        )
    };

    // A trailing slash makes `join` append to any path prefix instead of replacing it.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized).map_err(|e| invalid(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(&ClientConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_resolve_against_origin() {
        let t = transport("http://camera.local:8080");
        assert_eq!(
            t.resolve("/0/api/config").unwrap().as_str(),
            "http://camera.local:8080/0/api/config"
        );
    }

    #[test]
    fn test_resolve_keeps_path_prefix_and_query() {
        let t = transport("https://example.com/motion");
        assert_eq!(
            t.resolve("/2/config/set?threshold=2000").unwrap().as_str(),
            "https://example.com/motion/2/config/set?threshold=2000"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        let err = HttpTransport::new(&ClientConfig::default().with_base_url("ftp://x"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_unparseable_base() {
        assert!(HttpTransport::new(&ClientConfig::default().with_base_url("not a url")).is_err());
    }

    #[test]
    fn test_success_range() {
        let mut resp = RawResponse {
            status: 204,
            status_text: "No Content".into(),
            body: String::new(),
        };
        assert!(resp.is_success());
        resp.status = 302;
        assert!(!resp.is_success());
    }
}
