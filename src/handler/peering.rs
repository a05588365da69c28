use super::LambdaResponse;
use crate::config::{InvocationContext, ProbeSettings};
use crate::probe::dns::HostResolver;
use crate::probe::prelude::*;
use crate::probe::runner::{self, InvocationSummary};

/// Full diagnostic run for the peering deployment.
///
/// A secure GET failure is returned as the error so the platform records the
/// invocation as failed.
pub async fn handle<R: HostResolver>(
    context: &InvocationContext,
    settings: &ProbeSettings,
    resolver: &R,
) -> Result<LambdaResponse<InvocationSummary>, ProbeError> {
    log::info!("Starting Lambda execution");
    log::info!("Function name: {}", context.function_name);
    log::info!("=== Environment Info ===");
    log::info!(
        "AWS_REGION: {}",
        context.region.as_deref().unwrap_or("<unset>")
    );

    let targets: Vec<ProbeTarget> = settings.targets.iter().map(ProbeTarget::new).collect();

    match runner::run(&targets, context, settings, resolver).await {
        Ok(summary) => Ok(LambdaResponse::ok(summary)),
        Err(e) => {
            log::error!("Probe run failed: {e}");
            Err(e)
        }
    }
}
