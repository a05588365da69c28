//! Invocation handlers, one per deployment variant.
//!
//! Handlers take plain Rust values and know nothing about the Lambda runtime;
//! the binaries under `src/bin` adapt them to `lambda_runtime`.

pub mod nat;
pub mod peering;
pub mod transit;

use serde::Serialize;

/// The `{statusCode, body}` envelope every function returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaResponse<B> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: B,
}

impl<B> LambdaResponse<B> {
    pub fn ok(body: B) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }
}
