use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("service unavailable: {service}")]
    Unavailable { service: &'static str },
    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout {
        service: &'static str,
        timeout_ms: u64,
    },
    #[error("confidence out of range [0, 1]: {0}")]
    InvalidConfidence(f32),
    #[error("config error: {0}")]
    Config(String),
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl ServiceError {
    /// Stable machine-readable code carried in failed responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Unavailable { .. } => "unavailable",
            Self::Timeout { .. } => "timeout",
            Self::InvalidConfidence(_) => "invalid_confidence",
            Self::Config(_) => "config",
            Self::Backend(_) => "backend",
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    // 0: success
    // 11: config error
    // 20: IO / command error
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 11,
            Self::Service(ServiceError::Config(_)) => 11,
            Self::Io(_) | Self::Command(_) => 20,
            Self::Service(_) | Self::Anyhow(_) => 50,
        }
    }
}
