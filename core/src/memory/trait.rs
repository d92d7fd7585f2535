use crate::memory::models::{MemoryAddPayload, MemoryResult, MemorySearchPayload};
use async_trait::async_trait;

/// Per-user agentic memory (Mem0 style).
#[async_trait]
pub trait MemoryService: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, payload: MemorySearchPayload) -> anyhow::Result<Vec<MemoryResult>>;
    async fn add_memory(&self, payload: MemoryAddPayload) -> anyhow::Result<()>;
}
