use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::LambdaResponse;
use crate::config::model::TransitSettings;
use crate::probe::https::{ClientOptions, build_client, fetch_json};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransitRequest {
    /// Leave through VPC-B's NAT gateway by way of the transit gateway.
    #[serde(default)]
    pub use_vpc_b: bool,
}

fn client_options(request: &TransitRequest, settings: &TransitSettings) -> ClientOptions {
    let limit = settings.timeout_ms.map(Duration::from_millis);
    let proxy = request.use_vpc_b.then(|| settings.proxy_url());
    match &proxy {
        Some(proxy) => log::info!("Routing through {proxy}"),
        None => log::info!("Connecting directly"),
    }

    ClientOptions {
        connect_timeout: limit,
        read_timeout: limit,
        proxy,
    }
}

/// Decodes the raw invocation payload and runs [`handle`].
/// A payload that does not decode also yields a 500 response.
pub async fn handle_event(payload: Value, settings: &TransitSettings) -> LambdaResponse<Value> {
    let request = if payload.is_null() {
        TransitRequest::default()
    } else {
        match serde_json::from_value::<TransitRequest>(payload) {
            Ok(request) => request,
            Err(e) => return failure(format!("invalid request: {e}")),
        }
    };
    handle(&request, settings).await
}

pub fn failure(message: impl Into<String>) -> LambdaResponse<Value> {
    LambdaResponse {
        status_code: 500,
        body: Value::String(message.into()),
    }
}

/// One plain GET, optionally through the transit proxy address.
///
/// Never fails: any error becomes a 500 response carrying the error text.
pub async fn handle(request: &TransitRequest, settings: &TransitSettings) -> LambdaResponse<Value> {
    let outcome = match build_client(&client_options(request, settings)) {
        Ok(client) => fetch_json(&client, &settings.url).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(body) => LambdaResponse::ok(body),
        Err(e) => {
            log::error!("Request to {} failed: {e}", settings.url);
            failure(e.to_string())
        }
    }
}
