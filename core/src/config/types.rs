use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::graphrag::SearchType;
use crate::memory::DEFAULT_SEARCH_LIMIT;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub graphrag: GraphRagConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mem = &self.memory;
        if mem.max_limit == 0 {
            return Err(ServiceError::Config(
                "memory.max_limit must be greater than 0".into(),
            ));
        }
        if mem.default_limit == 0 || mem.default_limit > mem.max_limit {
            return Err(ServiceError::Config(format!(
                "memory.default_limit must be in 1..={} (got {})",
                mem.max_limit, mem.default_limit
            )));
        }
        if self.graphrag.max_query_chars == 0 {
            return Err(ServiceError::Config(
                "graphrag.max_query_chars must be greater than 0".into(),
            ));
        }

        for (section, timeout_ms) in [
            ("graphrag", self.graphrag.timeout_ms),
            ("memory", mem.timeout_ms),
            ("verification", self.verification.timeout_ms),
        ] {
            if timeout_ms == 0 {
                return Err(ServiceError::Config(format!(
                    "{section}.timeout_ms must be greater than 0"
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_true")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "advmem_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            console: true,
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRagConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub default_search_type: SearchType,

    #[serde(default = "default_graphrag_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
}

fn default_graphrag_timeout_ms() -> u64 {
    30_000
}

fn default_max_query_chars() -> usize {
    8_000
}

impl Default for GraphRagConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_search_type: SearchType::Global,
            timeout_ms: default_graphrag_timeout_ms(),
            max_query_chars: default_max_query_chars(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_memory_limit")]
    pub default_limit: usize,

    #[serde(default = "default_memory_max_limit")]
    pub max_limit: usize,

    #[serde(default = "default_memory_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_memory_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_memory_max_limit() -> usize {
    100
}

fn default_memory_timeout_ms() -> u64 {
    10_000
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_limit: default_memory_limit(),
            max_limit: default_memory_max_limit(),
            timeout_ms: default_memory_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_verification_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_verification_timeout_ms() -> u64 {
    30_000
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: default_verification_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.memory.default_limit, 5);
        assert_eq!(cfg.graphrag.default_search_type, SearchType::Global);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [graphrag]
            default_search_type = "local"

            [memory]
            max_limit = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.graphrag.default_search_type, SearchType::Local);
        assert_eq!(cfg.graphrag.timeout_ms, 30_000);
        assert_eq!(cfg.memory.max_limit, 20);
        assert_eq!(cfg.memory.default_limit, 5);
        assert!(cfg.verification.enabled);
    }

    #[test]
    fn test_toml_roundtrip() {
        let cfg = AppConfig::default();
        let s = cfg.to_toml_string().unwrap();
        let back: AppConfig = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_validate_defaults_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_limit_bounds() {
        let mut cfg = AppConfig::default();
        cfg.memory.default_limit = 0;
        assert!(matches!(cfg.validate(), Err(ServiceError::Config(_))));

        cfg.memory.default_limit = 200;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("1..=100"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut cfg = AppConfig::default();
        cfg.verification.timeout_ms = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("verification.timeout_ms"));
    }
}
