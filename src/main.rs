use std::path::PathBuf;

use investmatch_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use im_core::OnboardingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match bootstrap::resolve_config_path(std::env::args_os().nth(1).map(PathBuf::from)) {
        Some(path) => bootstrap::load_config(&path)?,
        None => OnboardingConfig::default(),
    };

    init_tracing_subscriber(&config.logging)?;
    tracing::info!(?config.surface, "starting InvestMatch onboarding demo");

    bootstrap::run_demo(&config).await
}
