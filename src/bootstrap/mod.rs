pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config_path};
pub use run::run_demo;
pub use wiring::build_host;
