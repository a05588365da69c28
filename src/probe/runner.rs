use std::collections::BTreeMap;

use serde::Serialize;

use super::dns::{HostResolver, resolve_targets};
use super::https::secure_get;
use super::prelude::*;
use super::tcp::probe_endpoints;
use crate::config::{InvocationContext, ProbeSettings};

/// Everything the peering function reports about one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationSummary {
    pub source_ip: String,
    pub function_name: String,
    pub request_time_seconds: f64,
    /// Hostname to IPv4 address, for targets that resolved.
    pub dns_results: BTreeMap<String, String>,
    pub probe_results: ProbeLog,
}

/// Runs DNS, TCP and secure GET phases strictly one after another.
///
/// DNS and TCP failures are recorded and never abort the run. A failed secure
/// GET is returned as the error and no summary is produced.
pub async fn run<R: HostResolver>(
    targets: &[ProbeTarget],
    context: &InvocationContext,
    settings: &ProbeSettings,
    resolver: &R,
) -> Result<InvocationSummary, ProbeError> {
    let mut probes = ProbeLog::new();

    let resolved = resolve_targets(resolver, targets, &mut probes).await;
    probe_endpoints(&resolved, &settings.tcp, settings.detail_width, &mut probes).await;
    let (source_ip, request_time_seconds) =
        secure_get(&settings.secure_get, settings.detail_width, &mut probes).await?;

    let dns_results = resolved
        .iter()
        .map(|r| (r.hostname.clone(), r.resolved_address.to_string()))
        .collect();

    Ok(InvocationSummary {
        source_ip,
        function_name: context.function_name.clone(),
        request_time_seconds,
        dns_results,
        probe_results: probes,
    })
}
