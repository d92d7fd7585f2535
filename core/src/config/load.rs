use std::path::{Path, PathBuf};

use super::types::{AppConfig, LoggingConfig};
use crate::error::ServiceError;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Get the default data directory: ~/.advmem
pub fn get_data_dir() -> Result<PathBuf, ServiceError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| ServiceError::Config("Cannot determine home directory".into()))?;
    Ok(PathBuf::from(home).join(".advmem"))
}

/// Log file directory: `logging.directory` if set, else ~/.advmem/logs,
/// else the OS temp dir.
pub fn resolve_log_dir(logging: &LoggingConfig) -> PathBuf {
    if let Some(dir) = logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return PathBuf::from(dir);
    }
    match get_data_dir() {
        Ok(dir) => dir.join("logs"),
        Err(_) => std::env::temp_dir().join("advmem"),
    }
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ServiceError> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| ServiceError::Config(format!("read {} failed: {}", path.display(), e)))?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| ServiceError::Config(format!("parse {} failed: {}", path.display(), e)))
}

pub fn load_default() -> Result<AppConfig, ServiceError> {
    // Priority 1: ~/.advmem/config.toml (highest)
    let home_config = get_data_dir()?.join(DEFAULT_CONFIG_FILE);

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new(DEFAULT_CONFIG_FILE);

    let mut cfg = if home_config.exists() {
        load_from_path(&home_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (Priority 0: highest)
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("ADVMEM_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = get("ADVMEM_GRAPHRAG_SEARCH_TYPE") {
        cfg.graphrag.default_search_type = v
            .parse()
            .map_err(|e| ServiceError::Config(format!("ADVMEM_GRAPHRAG_SEARCH_TYPE: {e}")))?;
    }
    if let Some(v) = get("ADVMEM_MEMORY_LIMIT") {
        cfg.memory.default_limit = v.trim().parse().map_err(|_| {
            ServiceError::Config(format!("ADVMEM_MEMORY_LIMIT is not a number: {v}"))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphrag::SearchType;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[memory]\ndefault_limit = 7").unwrap();
        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.memory.default_limit, 7);
    }

    #[test]
    fn test_load_from_path_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[memory\ndefault_limit = ").unwrap();
        let err = load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ServiceError::Config(ref m) if m.starts_with("parse")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ServiceError::Config(ref m) if m.starts_with("read")));
    }

    #[test]
    fn test_resolve_log_dir_prefers_configured() {
        let logging = LoggingConfig {
            directory: Some(" /var/log/advmem ".into()),
            ..LoggingConfig::default()
        };
        assert_eq!(resolve_log_dir(&logging), PathBuf::from("/var/log/advmem"));
    }

    #[test]
    fn test_resolve_log_dir_defaults_under_data_dir() {
        let logging = LoggingConfig {
            directory: Some("  ".into()),
            ..LoggingConfig::default()
        };
        let dir = resolve_log_dir(&logging);
        if let Ok(data_dir) = get_data_dir() {
            assert_eq!(dir, data_dir.join("logs"));
        }
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            env(&[
                ("ADVMEM_LOG_LEVEL", "debug"),
                ("ADVMEM_GRAPHRAG_SEARCH_TYPE", "local"),
                ("ADVMEM_MEMORY_LIMIT", " 12 "),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.graphrag.default_search_type, SearchType::Local);
        assert_eq!(cfg.memory.default_limit, 12);
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, env(&[("ADVMEM_LOG_LEVEL", "  ")])).unwrap();
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_bad_env_values_rejected() {
        let mut cfg = AppConfig::default();
        let err =
            apply_env_overrides(&mut cfg, env(&[("ADVMEM_MEMORY_LIMIT", "many")])).unwrap_err();
        assert!(err.to_string().contains("ADVMEM_MEMORY_LIMIT"));

        let err = apply_env_overrides(&mut cfg, env(&[("ADVMEM_GRAPHRAG_SEARCH_TYPE", "wide")]))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }
}
