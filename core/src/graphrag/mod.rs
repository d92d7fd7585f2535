pub mod models;
pub mod r#trait;

pub use models::{GraphQueryPayload, IndexSummary, SearchType};
pub use r#trait::GraphRagService;
