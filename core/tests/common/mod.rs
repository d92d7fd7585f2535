#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use advmem_core::api::{
    AppConfig, AppContext, GraphQueryPayload, GraphRagService, MemoryAddPayload, MemoryResult,
    MemorySearchPayload, MemoryService, Services, VerificationResult, VerificationService,
    VerifyPayload,
};
use async_trait::async_trait;

#[derive(Default)]
pub struct StubGraph {
    pub answer: String,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub queries: Mutex<Vec<GraphQueryPayload>>,
    pub indexed: Mutex<Vec<Vec<String>>>,
}

impl StubGraph {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl GraphRagService for StubGraph {
    fn name(&self) -> &str {
        "stub-graph"
    }

    async fn query(&self, payload: GraphQueryPayload) -> anyhow::Result<String> {
        stall(self.delay).await;
        if self.fail {
            anyhow::bail!("graph backend offline");
        }
        let answer = format!("{} [{}]", self.answer, payload.search_type);
        self.queries.lock().unwrap().push(payload);
        Ok(answer)
    }

    async fn index_documents(&self, documents: Vec<String>) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("graph backend offline");
        }
        self.indexed.lock().unwrap().push(documents);
        Ok(())
    }
}

#[derive(Default)]
pub struct StubMemory {
    pub stored: Vec<MemoryResult>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub searches: Mutex<Vec<MemorySearchPayload>>,
    pub added: Mutex<Vec<MemoryAddPayload>>,
}

impl StubMemory {
    /// Returns every stored item regardless of the requested limit.
    pub fn with_results(n: usize) -> Self {
        let stored = (0..n)
            .map(|i| MemoryResult {
                id: format!("m-{i}"),
                content: format!("memory {i}"),
                score: 1.0 - i as f32 * 0.01,
                ..MemoryResult::default()
            })
            .collect();
        Self {
            stored,
            ..Self::default()
        }
    }
}

#[async_trait]
impl MemoryService for StubMemory {
    fn name(&self) -> &str {
        "stub-memory"
    }

    async fn search(&self, payload: MemorySearchPayload) -> anyhow::Result<Vec<MemoryResult>> {
        stall(self.delay).await;
        if self.fail {
            anyhow::bail!("memory store unreachable");
        }
        self.searches.lock().unwrap().push(payload);
        Ok(self.stored.clone())
    }

    async fn add_memory(&self, payload: MemoryAddPayload) -> anyhow::Result<()> {
        stall(self.delay).await;
        if self.fail {
            anyhow::bail!("memory store unreachable");
        }
        self.added.lock().unwrap().push(payload);
        Ok(())
    }
}

pub struct StubVerifier {
    pub result: VerificationResult,
    pub score: f32,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub seen: Mutex<Vec<VerifyPayload>>,
}

impl StubVerifier {
    pub fn new(confidence: f32, score: f32) -> Self {
        Self {
            result: VerificationResult {
                is_verified: confidence >= 0.5,
                confidence,
                sources: vec!["encyclopedia".to_string()],
                details: None,
            },
            score,
            fail: false,
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VerificationService for StubVerifier {
    fn name(&self) -> &str {
        "stub-verifier"
    }

    async fn verify(&self, payload: VerifyPayload) -> anyhow::Result<VerificationResult> {
        stall(self.delay).await;
        if self.fail {
            anyhow::bail!("fact index unavailable");
        }
        self.seen.lock().unwrap().push(payload);
        Ok(self.result.clone())
    }

    async fn confidence_score(&self, _claim: String) -> anyhow::Result<f32> {
        stall(self.delay).await;
        if self.fail {
            anyhow::bail!("fact index unavailable");
        }
        Ok(self.score)
    }
}

async fn stall(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

pub fn context_with(services: Services) -> AppContext {
    AppContext::new(AppConfig::default(), services).unwrap()
}

pub fn graph_context(graph: Arc<StubGraph>) -> AppContext {
    context_with(Services::default().with_graphrag(graph))
}
