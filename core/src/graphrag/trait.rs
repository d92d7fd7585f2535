use crate::graphrag::models::GraphQueryPayload;
use async_trait::async_trait;

/// Knowledge graph operations backed by a GraphRAG engine.
#[async_trait]
pub trait GraphRagService: Send + Sync {
    fn name(&self) -> &str;

    /// Answers a natural language query using the requested search type.
    async fn query(&self, payload: GraphQueryPayload) -> anyhow::Result<String>;

    /// Indexes documents into the knowledge graph.
    async fn index_documents(&self, documents: Vec<String>) -> anyhow::Result<()>;
}
