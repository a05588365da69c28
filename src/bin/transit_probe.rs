use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use vpc_egress_probe::config::load_settings;
use vpc_egress_probe::handler::LambdaResponse;
use vpc_egress_probe::handler::transit;

async fn handle_request(event: LambdaEvent<Value>) -> Result<LambdaResponse<Value>, Error> {
    let response = match load_settings() {
        Ok(settings) => transit::handle_event(event.payload, &settings.transit).await,
        Err(e) => transit::failure(e.to_string()),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    vpc_egress_probe::init_logging();
    lambda_runtime::run(service_fn(handle_request)).await
}
