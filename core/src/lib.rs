//! Service contracts for the Advanced Memory system: a GraphRAG knowledge
//! graph, per-user agentic memory, and fact verification, plus the response
//! envelope and the wiring that ties registered implementations to config.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod graphrag;
pub mod memory;
pub mod response;
pub mod verification;
