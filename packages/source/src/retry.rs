//! HTTP retry helpers for transient errors.
//!
//! Fetchers call [`send_json`] instead of `reqwest::RequestBuilder::send()`
//! directly, so every request gets automatic retry with exponential
//! backoff on timeouts, connection resets, HTTP 429, and server errors.

use std::time::Duration;

use crate::SourceError;

/// Maximum retry attempts for transient HTTP errors. With exponential
/// backoff (2s, 4s, 8s) the total wait before giving up is 14 seconds.
const MAX_RETRIES: u32 = 3;

/// Maximum full re-fetch attempts when a response body arrives but
/// cannot be decoded as JSON (truncated or garbled responses).
const MAX_BODY_RETRIES: u32 = 2;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`. Connection errors, timeouts, HTTP 429, and HTTP 5xx are
/// retried with backoff; other 4xx statuses are permanent. A body that
/// fails to decode triggers a full re-fetch up to [`MAX_BODY_RETRIES`]
/// times before surfacing as [`SourceError::MalformedResponse`].
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries or the
/// body never parses as JSON.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    for body_attempt in 0..=MAX_BODY_RETRIES {
        let response = send_inner(&build_request).await?;
        let url = response.url().to_string();
        let status = response.status();

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                if body_attempt < MAX_BODY_RETRIES {
                    let delay = Duration::from_secs(1u64 << (body_attempt + 1));
                    log::warn!(
                        "Body read failed for {url} (retry {}/{MAX_BODY_RETRIES}) in {delay:?}: {e}",
                        body_attempt + 1,
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(SourceError::from_transport(e));
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => return Ok(value),
            Err(json_err) => {
                if body_attempt < MAX_BODY_RETRIES {
                    let delay = Duration::from_secs(1u64 << (body_attempt + 1));
                    log::warn!(
                        "JSON parse failed for {url} (retry {}/{MAX_BODY_RETRIES}) in {delay:?}: {json_err}",
                        body_attempt + 1,
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                let preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
                log::error!(
                    "JSON parse failed after {MAX_BODY_RETRIES} retries for {url} \
                     (status={status}, {} bytes): {json_err}\n  body preview: {preview}",
                    text.len(),
                );
                return Err(SourceError::MalformedResponse {
                    message: format!("JSON parse failed: {json_err} (status={status})"),
                });
            }
        }
    }

    unreachable!("send_json body-decode retry loop exited without returning")
}

/// Core retry loop: sends the request, retrying transient errors with
/// exponential backoff, and returns the successful response.
#[allow(clippy::future_not_send)]
async fn send_inner<F>(build_request: &F) -> Result<reqwest::Response, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<SourceError> = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    last_error = Some(SourceError::from_transport(e));
                    continue;
                }
                return Err(SourceError::from_transport(e));
            }
            Ok(response) => {
                let status = response.status();

                let retryable = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error();
                if retryable {
                    if attempt < MAX_RETRIES {
                        log::warn!("  HTTP {status}, retrying");
                        last_error = Some(SourceError::MalformedResponse {
                            message: format!("HTTP {status}"),
                        });
                        continue;
                    }
                    return Err(SourceError::MalformedResponse {
                        message: format!("HTTP {status} after {MAX_RETRIES} retries"),
                    });
                }

                // Remaining 4xx statuses are permanent.
                if status.is_client_error() {
                    return Err(SourceError::MalformedResponse {
                        message: format!("HTTP {status}"),
                    });
                }

                return Ok(response);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| SourceError::MalformedResponse {
        message: "request failed after all retries".to_string(),
    }))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
