pub mod app_config;
pub mod model;

pub use app_config::{InvocationContext, load_settings, setup_resolver};
pub use model::ProbeSettings;
