mod load;
mod types;

pub use load::{get_data_dir, load_default, load_from_path, resolve_log_dir, DEFAULT_CONFIG_FILE};
pub use types::{AppConfig, GraphRagConfig, LoggingConfig, MemoryConfig, VerificationConfig};
