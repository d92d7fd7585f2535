//! Effective configuration inspection
use std::path::Path;

use advmem_core::api as core_api;

use crate::commands::cli::ConfigFormat;

/// Load from `path` when given, otherwise from the default search locations.
pub fn load_config(path: Option<&Path>) -> Result<core_api::AppConfig, core_api::CliError> {
    let cfg = match path {
        Some(p) => core_api::load_from_path(p),
        None => core_api::load_default(),
    }
    .map_err(|e| core_api::CliError::Config(e.to_string()))?;
    Ok(cfg)
}

pub fn render_config(
    cfg: &core_api::AppConfig,
    format: ConfigFormat,
) -> Result<String, core_api::CliError> {
    cfg.validate()
        .map_err(|e| core_api::CliError::Config(e.to_string()))?;

    match format {
        ConfigFormat::Toml => Ok(cfg.to_toml_string()?),
        ConfigFormat::Json => serde_json::to_string_pretty(cfg)
            .map_err(|e| core_api::CliError::Command(format!("Failed to encode config: {}", e))),
    }
}
