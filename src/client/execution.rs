//! 请求执行逻辑：超时、瞬时错误重试、CSRF 令牌刷新重放。
//!
//! Request execution: the bounded retry loop and CSRF recovery.
//!
//! Order of checks for a non-success response:
//! 1. 401: publish an auth event, fail. Never retried.
//! 2. 403 on a mutating verb: invalidate the token, re-fetch it once, replay once.
//! 3. 502/503/504 with a retry left: sleep, loop.
//! 4. Anything else: `HTTP <status>: <statusText>`.

use crate::api::endpoints;
use crate::client::policy::Decision;
use crate::client::request::RequestDescriptor;
use crate::error_code::StatusCode;
use crate::transport::RawResponse;
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core::MotionClient;

impl MotionClient {
    pub(crate) async fn execute(&self, mut request: RequestDescriptor) -> Result<Value> {
        let call_id = Uuid::new_v4();

        loop {
            let response = self.send_attempt(&request, call_id).await?;
            if response.is_success() {
                return parse_body(&response.body);
            }

            let status = response.status;
            let code = StatusCode::from_http_status(status).map(|c| c.name());

            if status == 401 {
                info!(
                    %call_id,
                    method = request.method.as_str(),
                    endpoint = request.endpoint.as_str(),
                    "motion-console request requires authentication"
                );
                self.context.notify_auth_error(401);
                return Err(Error::authentication_required());
            }

            if status == 403 && request.method.is_mutating() {
                return self.recover_csrf(&request, call_id).await;
            }

            match self.policy.decide(status, request.retry_count) {
                Decision::Retry { delay } => {
                    warn!(
                        %call_id,
                        http_status = status,
                        standard_code = code.unwrap_or("unmapped"),
                        endpoint = request.endpoint.as_str(),
                        retry_count = request.retry_count,
                        delay_ms = delay.as_millis() as u64,
                        "motion-console transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    request.retry_count += 1;
                }
                Decision::Fail => {
                    info!(
                        %call_id,
                        http_status = status,
                        standard_code = code.unwrap_or("unmapped"),
                        method = request.method.as_str(),
                        endpoint = request.endpoint.as_str(),
                        retry_count = request.retry_count,
                        "motion-console request failed"
                    );
                    return Err(Error::http(status, &response.status_text));
                }
            }
        }
    }

    /// One network attempt. The token is read from the context right before sending.
    async fn send_attempt(&self, request: &RequestDescriptor, call_id: Uuid) -> Result<RawResponse> {
        let csrf_token = if request.method.is_mutating() {
            self.context.csrf_token()
        } else {
            None
        };
        let credentials = self.context.credentials();

        debug!(
            %call_id,
            method = request.method.as_str(),
            endpoint = request.endpoint.as_str(),
            retry_count = request.retry_count,
            has_csrf_token = csrf_token.is_some(),
            "motion-console request attempt"
        );

        let start = std::time::Instant::now();
        let result = self
            .transport
            .execute(
                request.method,
                &request.endpoint,
                request.body.as_ref(),
                csrf_token.as_deref(),
                credentials.as_deref(),
            )
            .await;

        match &result {
            Ok(resp) => debug!(
                %call_id,
                http_status = resp.status,
                duration_ms = start.elapsed().as_millis() as u64,
                "motion-console response received"
            ),
            Err(e) => info!(
                %call_id,
                endpoint = request.endpoint.as_str(),
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "motion-console request did not complete"
            ),
        }
        result
    }

    /// Stale-token recovery after a 403 on a mutating verb.
    ///
    /// The replay's own status is not reported: any replay failure ends in the
    /// CSRF error, with an auth event first when the replay got 401/403.
    async fn recover_csrf(&self, request: &RequestDescriptor, call_id: Uuid) -> Result<Value> {
        self.context.invalidate_csrf_token();
        info!(
            %call_id,
            method = request.method.as_str(),
            endpoint = request.endpoint.as_str(),
            "motion-console CSRF token rejected, refreshing"
        );

        let token = match self.fetch_csrf_token(call_id).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!(%call_id, "motion-console config response carried no CSRF token");
                return Err(Error::csrf_validation());
            }
            Err(e) => {
                warn!(%call_id, error = %e, "motion-console CSRF token refresh failed");
                return Err(Error::csrf_validation());
            }
        };
        self.context.set_csrf_token(token);

        let replay = self.send_attempt(request, call_id).await?;
        if replay.is_success() {
            info!(%call_id, "motion-console request succeeded after CSRF refresh");
            return parse_body(&replay.body);
        }

        info!(
            %call_id,
            http_status = replay.status,
            endpoint = request.endpoint.as_str(),
            "motion-console replay after CSRF refresh failed"
        );
        if matches!(replay.status, 401 | 403) {
            self.context.notify_auth_error(replay.status);
        }
        Err(Error::csrf_validation())
    }

    /// Single fetch of the config resource, no transient retry.
    async fn fetch_csrf_token(&self, call_id: Uuid) -> Result<Option<String>> {
        let request = RequestDescriptor::get(endpoints::CONFIG);
        let response = self.send_attempt(&request, call_id).await?;
        if response.status == 401 {
            self.context.notify_auth_error(401);
            return Err(Error::authentication_required());
        }
        if !response.is_success() {
            return Err(Error::http(response.status, &response.status_text));
        }
        Ok(extract_csrf_token(&parse_body(&response.body)?))
    }
}

/// Empty body is an empty object; anything else must be JSON.
pub(crate) fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(body)?)
}

pub(crate) fn extract_csrf_token(config: &Value) -> Option<String> {
    config
        .get("csrf_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
