use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use vpc_egress_probe::config::{InvocationContext, load_settings, setup_resolver};
use vpc_egress_probe::handler::LambdaResponse;
use vpc_egress_probe::handler::peering;
use vpc_egress_probe::probe::runner::InvocationSummary;

async fn handle_request(
    event: LambdaEvent<Value>,
) -> Result<LambdaResponse<InvocationSummary>, Error> {
    let context = InvocationContext::new(event.context.env_config.function_name.clone());
    let settings = load_settings()?;
    let resolver = setup_resolver()?;

    Ok(peering::handle(&context, &settings, &resolver).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    vpc_egress_probe::init_logging();
    lambda_runtime::run(service_fn(handle_request)).await
}
