use serde::Serialize;

use super::LambdaResponse;
use crate::probe::https::{ClientOptions, build_client, fetch_ip};
use crate::probe::prelude::*;
use crate::probe::retry::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NatBody {
    pub message: String,
    pub ip: String,
}

/// Bare egress check: a single GET to the IP echo endpoint.
/// No diagnostics, no retries, client default timeouts.
pub async fn handle(url: &str) -> Result<LambdaResponse<NatBody>, ProbeError> {
    let client = build_client(&ClientOptions::default()).map_err(ProbeError::HttpFailed)?;
    let ip = fetch_ip(&client, url, &RetryPolicy::no_retry())
        .await
        .map_err(ProbeError::HttpFailed)?;
    log::info!("Egress IP: {ip}");

    Ok(LambdaResponse::ok(NatBody {
        message: "Success".to_string(),
        ip,
    }))
}
