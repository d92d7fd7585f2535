//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `advmem_core::api` instead of reaching into internal modules.

pub use crate::config::{
    get_data_dir, load_default, load_from_path, resolve_log_dir, AppConfig, GraphRagConfig,
    LoggingConfig, MemoryConfig, VerificationConfig, DEFAULT_CONFIG_FILE,
};
pub use crate::context::{AppContext, Services, ServicesFactory, GRAPHRAG, MEMORY, VERIFICATION};
pub use crate::error::{CliError, ServiceError};
pub use crate::graphrag::{GraphQueryPayload, GraphRagService, IndexSummary, SearchType};
pub use crate::memory::{
    MemoryAddPayload, MemoryAdded, MemoryResult, MemorySearchPayload, MemoryService,
    DEFAULT_SEARCH_LIMIT,
};
pub use crate::response::{
    AddMemoryResponse, BaseResponse, ConfidenceResponse, IndexResponse, MemorySearchResponse,
    QueryResponse, ServiceResponse, VerificationResponse,
};
pub use crate::verification::{Confidence, VerificationResult, VerificationService, VerifyPayload};
