use std::env;
use std::path::Path;

use trust_dns_resolver::TokioAsyncResolver;
use url::Url;

use super::model::ProbeSettings;
use crate::probe::error::ProbeError;

pub const CONFIG_FILE_ENV: &str = "PROBE_CONFIG_FILE";
pub const REGION_ENV: &str = "AWS_REGION";

/// Per-invocation facts supplied by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub function_name: String,
    /// Deployment region, only ever logged.
    pub region: Option<String>,
}

impl InvocationContext {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            region: env::var(REGION_ENV).ok(),
        }
    }
}

/// Load the probe settings.
/// Reads a `.env` file when present, then the YAML file named by
/// `PROBE_CONFIG_FILE`. Without that variable the built-in defaults are used.
pub fn load_settings() -> Result<ProbeSettings, ProbeError> {
    dotenvy::dotenv().ok();

    let settings = match env::var(CONFIG_FILE_ENV) {
        Ok(location) => {
            log::info!("Loading probe settings from {location}");
            load_settings_file(Path::new(&location))?
        }
        Err(_) => ProbeSettings::default(),
    };

    validate(&settings)?;
    Ok(settings)
}

pub fn load_settings_file(path: &Path) -> Result<ProbeSettings, ProbeError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ProbeError::Config(format!("cannot read {}: {e}", path.display())))?;
    parse_settings(&raw)
}

pub fn parse_settings(raw: &str) -> Result<ProbeSettings, ProbeError> {
    // An empty document deserializes to unit, not to a mapping.
    if raw.trim().is_empty() {
        return Ok(ProbeSettings::default());
    }
    serde_yaml::from_str(raw).map_err(|e| ProbeError::Config(format!("invalid YAML: {e}")))
}

pub fn validate(settings: &ProbeSettings) -> Result<(), ProbeError> {
    if settings.targets.is_empty() {
        return Err(ProbeError::Config("at least one target is required".into()));
    }
    if let Some(blank) = settings.targets.iter().position(|t| t.trim().is_empty()) {
        return Err(ProbeError::Config(format!("target #{blank} is empty")));
    }
    if settings.secure_get.retry.max_attempts == 0 {
        return Err(ProbeError::Config("retry.max_attempts must be at least 1".into()));
    }
    for url in [&settings.secure_get.url, &settings.transit.url] {
        Url::parse(url).map_err(|e| ProbeError::Config(format!("invalid URL {url}: {e}")))?;
    }
    Url::parse(&settings.transit.proxy_url()).map_err(|e| {
        ProbeError::Config(format!(
            "invalid proxy address {}: {e}",
            settings.transit.proxy_address
        ))
    })?;
    Ok(())
}

/// Setup a DNS resolver from the platform configuration (`/etc/resolv.conf`),
/// keeping the platform's timeouts.
pub fn setup_resolver() -> Result<TokioAsyncResolver, ProbeError> {
    TokioAsyncResolver::tokio_from_system_conf()
        .map_err(|e| ProbeError::Config(format!("cannot build resolver: {e}")))
}
