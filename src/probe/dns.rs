use std::future::Future;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Instant;

use trust_dns_resolver::TokioAsyncResolver;

use super::prelude::*;

/// Name resolution seam for the DNS phase.
pub trait HostResolver {
    fn lookup_ipv4(&self, host: &str) -> impl Future<Output = Result<Ipv4Addr, ProbeError>> + Send;
}

impl HostResolver for TokioAsyncResolver {
    async fn lookup_ipv4(&self, host: &str) -> Result<Ipv4Addr, ProbeError> {
        let lookup = self
            .lookup_ip(host)
            .await
            .map_err(|e| ProbeError::ResolutionFailed {
                host: host.to_string(),
                reason: super::report(&e),
            })?;

        first_ipv4(lookup.iter()).ok_or_else(|| ProbeError::ResolutionFailed {
            host: host.to_string(),
            reason: "no IPv4 address in answer".to_string(),
        })
    }
}

/// First IPv4 address of an answer. AAAA records are skipped.
fn first_ipv4(ips: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    ips.into_iter().find_map(|ip| match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}

/// Resolves every target in order, recording one DNS result per target.
/// Returns the endpoints that resolved; failures only show up in the log.
pub async fn resolve_targets<R: HostResolver>(
    resolver: &R,
    targets: &[ProbeTarget],
    probes: &mut ProbeLog,
) -> Vec<ResolvedEndpoint> {
    log::info!("=== DNS Tests ===");
    let mut resolved = Vec::with_capacity(targets.len());

    for target in targets {
        let host = target.hostname.as_str();
        log::info!("Testing DNS resolution for {host}");

        let start = Instant::now();
        let outcome = resolver.lookup_ipv4(host).await;
        let duration = start.elapsed().as_secs_f64();

        match outcome {
            Ok(ip) => {
                log::info!("Resolved {host} -> {ip} in {duration:.2}s");
                probes.push(ProbeResult {
                    step_kind: StepKind::Dns,
                    target: host.to_string(),
                    success: true,
                    duration_seconds: duration,
                    detail: ip.to_string(),
                });
                resolved.push(ResolvedEndpoint {
                    hostname: host.to_string(),
                    resolved_address: ip,
                });
            }
            Err(e) => {
                log::warn!("Failed to resolve {host}: {e}");
                probes.push(ProbeResult {
                    step_kind: StepKind::Dns,
                    target: host.to_string(),
                    success: false,
                    duration_seconds: duration,
                    detail: e.to_string(),
                });
            }
        }
    }

    resolved
}
