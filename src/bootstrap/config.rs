//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML configuration file into [`OnboardingConfig`]. Missing keys
//! fall back to the DTO defaults; no further checks are made here.

use std::path::{Path, PathBuf};

use anyhow::Context;
use im_core::OnboardingConfig;

pub const CONFIG_ENV_VAR: &str = "INVESTMATCH_CONFIG";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for the
/// configuration structure.
pub fn load_config(config_path: &Path) -> anyhow::Result<OnboardingConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Pick the configuration file to load.
///
/// An explicit path wins, then `INVESTMATCH_CONFIG`, then
/// `<config dir>/investmatch/config.toml` if that file exists.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join("investmatch").join(CONFIG_FILE_NAME))
                .filter(|path| path.exists())
        })
}
