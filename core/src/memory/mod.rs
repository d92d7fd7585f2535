pub mod models;
pub mod r#trait;

pub use models::{
    MemoryAddPayload, MemoryAdded, MemoryResult, MemorySearchPayload, DEFAULT_SEARCH_LIMIT,
};
pub use r#trait::MemoryService;
