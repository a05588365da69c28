use serde::Deserialize;

use crate::probe::retry::RetryPolicy;

pub const DEFAULT_TARGETS: [&str; 3] = [
    "checkip.amazonaws.com",
    "s3.amazonaws.com",
    "api.amazonwebservices.com",
];
pub const DEFAULT_IP_ECHO_URL: &str = "https://checkip.amazonaws.com/";
pub const DEFAULT_TRANSIT_URL: &str = "https://httpbin.org/ip";
pub const DEFAULT_TRANSIT_PROXY: &str = "10.1.1.100";

/// Settings shared by all probe functions.
/// Every field has a default, so an empty YAML document is a valid configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Hostnames run through the DNS and TCP phases, in order.
    pub targets: Vec<String>,

    /// TCP phase settings.
    pub tcp: TcpSettings,

    /// The retried HTTPS request to the IP echo endpoint.
    pub secure_get: SecureGetSettings,

    /// The plain GET made by the transit gateway function.
    pub transit: TransitSettings,

    /// Maximum display width of response excerpts stored in probe results.
    pub detail_width: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            targets: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
            tcp: TcpSettings::default(),
            secure_get: SecureGetSettings::default(),
            transit: TransitSettings::default(),
            detail_width: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TcpSettings {
    pub port: u16,
    pub connect_timeout_ms: u64,
    /// Deadline for the first byte after the raw HTTP request.
    pub read_timeout_ms: u64,
}

impl Default for TcpSettings {
    fn default() -> Self {
        Self {
            port: 443,
            connect_timeout_ms: 10_000,
            read_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecureGetSettings {
    /// Endpoint that answers with the caller's public IP as plain text.
    pub url: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl Default for SecureGetSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_IP_ECHO_URL.to_string(),
            connect_timeout_ms: 10_000,
            read_timeout_ms: 10_000,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransitSettings {
    /// Endpoint returning a JSON document that names the caller's origin IP.
    pub url: String,

    /// Host (or `host:port`) used as the proxy when `use_vpc_b` is set.
    /// Its only purpose is to make the route table send traffic over the
    /// transit gateway.
    pub proxy_address: String,

    /// Connect and read deadline. None waits until the function times out.
    pub timeout_ms: Option<u64>,
}

impl Default for TransitSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_TRANSIT_URL.to_string(),
            proxy_address: DEFAULT_TRANSIT_PROXY.to_string(),
            timeout_ms: None,
        }
    }
}

impl TransitSettings {
    pub fn proxy_url(&self) -> String {
        if self.proxy_address.contains("://") {
            self.proxy_address.clone()
        } else {
            format!("http://{}", self.proxy_address)
        }
    }
}
