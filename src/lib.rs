//! Connectivity diagnostics for Lambda functions running inside a VPC.
//!
//! The peering function resolves a few well-known hosts, opens TCP connections
//! to them and finally asks an IP echo service which address the traffic left
//! from. The transit gateway and NAT functions only perform the final request.

pub mod config;
pub mod handler;
pub mod probe;

/// Initialise `env_logger` for a Lambda process.
/// `RUST_LOG` overrides the default `info` filter. Output goes to stderr
/// without colors so CloudWatch keeps it readable.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .write_style(env_logger::WriteStyle::Never)
        .try_init();
}
