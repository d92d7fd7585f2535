//! Default configuration bootstrap
use std::path::PathBuf;

use advmem_core::api as core_api;

use crate::commands::cli::InitArgs;

#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Handle init command
pub fn handle_init(args: &InitArgs) -> Result<InitOutcome, core_api::CliError> {
    let config_path = match &args.path {
        Some(p) => p.clone(),
        None => core_api::get_data_dir()?.join(core_api::DEFAULT_CONFIG_FILE),
    };

    if config_path.exists() && !args.force {
        return Ok(InitOutcome::AlreadyExists(config_path));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            core_api::CliError::Command(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = core_api::AppConfig::default().to_toml_string()?;
    std::fs::write(&config_path, content).map_err(|e| {
        core_api::CliError::Command(format!("Failed to write configuration: {}", e))
    })?;

    tracing::info!(path = %config_path.display(), "configuration written");
    Ok(InitOutcome::Created(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let outcome = handle_init(&InitArgs {
            path: Some(path.clone()),
            force: false,
        })
        .unwrap();
        assert_eq!(outcome, InitOutcome::Created(path.clone()));

        let cfg = core_api::load_from_path(&path).unwrap();
        assert_eq!(cfg, core_api::AppConfig::default());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let outcome = handle_init(&InitArgs {
            path: Some(path.clone()),
            force: false,
        })
        .unwrap();
        assert_eq!(outcome, InitOutcome::AlreadyExists(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let outcome = handle_init(&InitArgs {
            path: Some(path.clone()),
            force: true,
        })
        .unwrap();
        assert_eq!(outcome, InitOutcome::Created(path.clone()));
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("[memory]"));
    }
}
