use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use vpc_egress_probe::config::load_settings;
use vpc_egress_probe::handler::LambdaResponse;
use vpc_egress_probe::handler::nat::{self, NatBody};

async fn handle_request(_event: LambdaEvent<Value>) -> Result<LambdaResponse<NatBody>, Error> {
    let settings = load_settings()?;
    Ok(nat::handle(&settings.secure_get.url).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    vpc_egress_probe::init_logging();
    lambda_runtime::run(service_fn(handle_request)).await
}
