use std::time::{Duration, Instant};

use reqwest::{Client, Proxy};

use super::prelude::*;
use super::retry::RetryPolicy;
use crate::config::model::SecureGetSettings;

/// Timeouts and routing for one HTTP client instance.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    /// Send every request, whatever the scheme, through this proxy URL.
    pub proxy: Option<String>,
}

pub fn build_client(options: &ClientOptions) -> Result<Client, HttpFailure> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(limit) = options.connect_timeout {
        builder = builder.connect_timeout(limit);
    }
    if let Some(limit) = options.read_timeout {
        builder = builder.read_timeout(limit);
    }
    match &options.proxy {
        Some(proxy) => {
            let proxy = Proxy::all(proxy.as_str())
                .map_err(|e| HttpFailure::Transport(super::report(&e)))?;
            builder = builder.proxy(proxy);
        }
        None => builder = builder.no_proxy(),
    }

    builder
        .build()
        .map_err(|e| HttpFailure::Transport(super::report(&e)))
}

/// Issues a GET and returns the body.
///
/// Only a status listed in `retry_on` is a failure. Any other status, error
/// pages included, hands its body back to the caller.
async fn get_body(client: &Client, url: &str, retry_on: &[u16]) -> Result<Vec<u8>, HttpFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HttpFailure::from_reqwest(&e))?;

    let status = response.status();
    if retry_on.contains(&status.as_u16()) {
        return Err(HttpFailure::Status(status.as_u16()));
    }
    if !status.is_success() {
        log::warn!("{url} answered with {status}, using the body as is");
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| HttpFailure::from_reqwest(&e))?;
    Ok(body.to_vec())
}

/// Decodes an IP echo body: UTF-8 text with surrounding whitespace removed.
pub fn decode_ip_body(body: &[u8]) -> Result<String, HttpFailure> {
    let text = std::str::from_utf8(body).map_err(|e| HttpFailure::Decode(e.to_string()))?;
    Ok(text.trim().to_string())
}

/// Fetches the caller's public IP from an echo endpoint under `policy`.
///
/// A retryable status fails the fetch once the attempts run out; every other
/// status has its body decoded.
pub async fn fetch_ip(client: &Client, url: &str, policy: &RetryPolicy) -> Result<String, HttpFailure> {
    let retry_on = policy.retryable_statuses.as_slice();
    let body = policy
        .execute(|attempt| async move {
            log::debug!("GET {url} (attempt {attempt})");
            get_body(client, url, retry_on).await
        })
        .await?;
    decode_ip_body(&body)
}

/// Single GET whose body is parsed as JSON; the status code is not checked.
pub async fn fetch_json(client: &Client, url: &str) -> Result<serde_json::Value, HttpFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HttpFailure::from_reqwest(&e))?;
    log::info!("{url} answered with {}", response.status());

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| HttpFailure::Decode(super::report(&e)))
}

/// The secure GET phase: one retried request to the IP echo endpoint.
///
/// The outcome is appended to `probes`. Returns the source IP and the request
/// duration, or the failure that ends the invocation.
pub async fn secure_get(
    settings: &SecureGetSettings,
    detail_width: usize,
    probes: &mut ProbeLog,
) -> Result<(String, f64), ProbeError> {
    log::info!("=== HTTP Request Test ===");
    let options = ClientOptions {
        connect_timeout: Some(Duration::from_millis(settings.connect_timeout_ms)),
        read_timeout: Some(Duration::from_millis(settings.read_timeout_ms)),
        proxy: None,
    };

    let start = Instant::now();
    let outcome = match build_client(&options) {
        Ok(client) => {
            log::info!("Starting HTTP request to {}", settings.url);
            fetch_ip(&client, &settings.url, &settings.retry).await
        }
        Err(e) => Err(e),
    };
    let duration = start.elapsed().as_secs_f64();

    match outcome {
        Ok(ip) => {
            log::info!("Request successful in {duration:.2}s, retrieved IP: {ip}");
            probes.push(ProbeResult {
                step_kind: StepKind::HttpsGet,
                target: settings.url.clone(),
                success: true,
                duration_seconds: duration,
                detail: super::excerpt(&ip, detail_width),
            });
            Ok((ip, duration))
        }
        Err(failure) => {
            log::error!("HTTP request to {} failed: {failure}", settings.url);
            probes.push(ProbeResult {
                step_kind: StepKind::HttpsGet,
                target: settings.url.clone(),
                success: false,
                duration_seconds: duration,
                detail: failure.to_string(),
            });
            Err(ProbeError::HttpFailed(failure))
        }
    }
}
