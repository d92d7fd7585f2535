//! Service wiring and the response-wrapping facade.
//!
//! `AppContext` owns the configuration and whichever contract implementations
//! the caller registered. Every facade call validates its inputs, runs the
//! contract call under the section timeout, and folds the outcome into a
//! [`ServiceResponse`].

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::graphrag::{GraphQueryPayload, GraphRagService, IndexSummary, SearchType};
use crate::memory::{
    MemoryAddPayload, MemoryAdded, MemoryResult, MemorySearchPayload, MemoryService,
};
use crate::response::{
    AddMemoryResponse, ConfidenceResponse, IndexResponse, MemorySearchResponse, QueryResponse,
    ServiceResponse, VerificationResponse,
};
use crate::verification::{Confidence, VerificationResult, VerificationService, VerifyPayload};

pub const GRAPHRAG: &str = "graphrag";
pub const MEMORY: &str = "memory";
pub const VERIFICATION: &str = "verification";

#[derive(Clone, Default)]
pub struct Services {
    pub graphrag: Option<Arc<dyn GraphRagService>>,
    pub memory: Option<Arc<dyn MemoryService>>,
    pub verification: Option<Arc<dyn VerificationService>>,
}

impl Services {
    pub fn with_graphrag(mut self, svc: Arc<dyn GraphRagService>) -> Self {
        self.graphrag = Some(svc);
        self
    }

    pub fn with_memory(mut self, svc: Arc<dyn MemoryService>) -> Self {
        self.memory = Some(svc);
        self
    }

    pub fn with_verification(mut self, svc: Arc<dyn VerificationService>) -> Self {
        self.verification = Some(svc);
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let graphrag = self.graphrag.as_ref().map(|s| s.name());
        let memory = self.memory.as_ref().map(|s| s.name());
        let verification = self.verification.as_ref().map(|s| s.name());
        f.debug_struct("Services")
            .field("graphrag", &graphrag)
            .field("memory", &memory)
            .field("verification", &verification)
            .finish()
    }
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, ServiceError>;
}

#[derive(Clone, Debug)]
pub struct AppContext {
    cfg: AppConfig,
    services: Services,
}

impl AppContext {
    pub fn new(cfg: AppConfig, services: Services) -> Result<Self, ServiceError> {
        cfg.validate()?;
        Ok(Self { cfg, services })
    }

    pub async fn from_factory(
        cfg: AppConfig,
        factory: &dyn ServicesFactory,
    ) -> Result<Self, ServiceError> {
        cfg.validate()?;
        let services = factory.build_services(&cfg).await?;
        tracing::info!(?services, "services built");
        Ok(Self { cfg, services })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn with_config(&self, cfg: AppConfig) -> Result<Self, ServiceError> {
        Self::new(cfg, self.services.clone())
    }

    // ============= GraphRAG =============

    pub async fn query(
        &self,
        query: &str,
        search_type: Option<&str>,
        user_context: Option<&str>,
    ) -> QueryResponse {
        let fut = self.query_inner(query, search_type, user_context);
        respond(GRAPHRAG, "query", fut).await
    }

    pub async fn index_documents<I, S>(&self, documents: I) -> IndexResponse
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<String> = documents.into_iter().map(Into::into).collect();
        respond(GRAPHRAG, "index_documents", self.index_inner(documents)).await
    }

    async fn query_inner(
        &self,
        query: &str,
        search_type: Option<&str>,
        user_context: Option<&str>,
    ) -> Result<String, ServiceError> {
        let query = require_text("query", query)?;
        let max = self.cfg.graphrag.max_query_chars;
        let len = query.chars().count();
        if len > max {
            return Err(ServiceError::invalid(format!(
                "query too long ({len} chars, max {max})"
            )));
        }
        let search_type = match non_blank(search_type) {
            Some(s) => s.parse::<SearchType>()?,
            None => self.cfg.graphrag.default_search_type,
        };
        let user_context = non_blank(user_context);

        let svc = self.graphrag()?;
        tracing::debug!(backend = svc.name(), %search_type, "dispatching graph query");
        let payload = GraphQueryPayload {
            query: query.to_string(),
            search_type,
            user_context,
        };
        bounded(GRAPHRAG, self.cfg.graphrag.timeout_ms, svc.query(payload)).await
    }

    async fn index_inner(&self, documents: Vec<String>) -> Result<IndexSummary, ServiceError> {
        if documents.is_empty() {
            return Err(ServiceError::invalid("documents cannot be empty"));
        }
        let total = documents.len();
        let documents: Vec<String> = documents
            .into_iter()
            .filter(|d| !d.trim().is_empty())
            .collect();
        if documents.is_empty() {
            return Err(ServiceError::invalid("all documents are blank"));
        }
        if documents.len() < total {
            tracing::debug!(dropped = total - documents.len(), "dropped blank documents");
        }

        let svc = self.graphrag()?;
        let submitted = documents.len();
        bounded(
            GRAPHRAG,
            self.cfg.graphrag.timeout_ms,
            svc.index_documents(documents),
        )
        .await?;
        Ok(IndexSummary { submitted })
    }

    // ============= Memory =============

    pub async fn search_memory(
        &self,
        user_id: &str,
        query: &str,
        limit: Option<usize>,
    ) -> MemorySearchResponse {
        respond(MEMORY, "search", self.search_inner(user_id, query, limit)).await
    }

    pub async fn add_memory(
        &self,
        user_id: &str,
        content: &str,
        metadata: Option<Map<String, Value>>,
    ) -> AddMemoryResponse {
        let fut = self.add_inner(user_id, content, metadata);
        respond(MEMORY, "add_memory", fut).await
    }

    async fn search_inner(
        &self,
        user_id: &str,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<MemoryResult>, ServiceError> {
        let user_id = require_text("user_id", user_id)?;
        let query = require_text("query", query)?;
        let cfg = &self.cfg.memory;
        let limit = match limit {
            Some(0) => return Err(ServiceError::invalid("limit must be greater than 0")),
            Some(n) if n > cfg.max_limit => {
                tracing::debug!(requested = n, max = cfg.max_limit, "clamping memory limit");
                cfg.max_limit
            }
            Some(n) => n,
            None => cfg.default_limit,
        };

        let svc = self.memory()?;
        let payload = MemorySearchPayload {
            user_id: user_id.to_string(),
            query: query.to_string(),
            limit,
        };
        let mut results = bounded(MEMORY, cfg.timeout_ms, svc.search(payload)).await?;
        if results.len() > limit {
            tracing::debug!(
                backend = svc.name(),
                returned = results.len(),
                limit,
                "truncating memory results"
            );
            results.truncate(limit);
        }
        Ok(results)
    }

    async fn add_inner(
        &self,
        user_id: &str,
        content: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<MemoryAdded, ServiceError> {
        let user_id = require_text("user_id", user_id)?;
        let content = require_text("content", content)?;

        let svc = self.memory()?;
        let payload = MemoryAddPayload {
            user_id: user_id.to_string(),
            content: content.to_string(),
            metadata,
        };
        bounded(MEMORY, self.cfg.memory.timeout_ms, svc.add_memory(payload)).await?;
        Ok(MemoryAdded {
            user_id: user_id.to_string(),
        })
    }

    // ============= Verification =============

    pub async fn verify<I, S>(&self, statement: &str, sources: Option<I>) -> VerificationResponse
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Option<Vec<String>> =
            sources.map(|s| s.into_iter().map(Into::into).collect());
        let fut = self.verify_inner(statement, sources);
        respond(VERIFICATION, "verify", fut).await
    }

    pub async fn confidence_score(&self, claim: &str) -> ConfidenceResponse {
        let fut = self.confidence_inner(claim);
        respond(VERIFICATION, "confidence_score", fut).await
    }

    async fn verify_inner(
        &self,
        statement: &str,
        sources: Option<Vec<String>>,
    ) -> Result<VerificationResult, ServiceError> {
        let statement = require_text("statement", statement)?;
        let sources = sources
            .map(|list| {
                list.into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty());

        let svc = self.verification()?;
        let payload = VerifyPayload {
            statement: statement.to_string(),
            sources,
        };
        let result = bounded(
            VERIFICATION,
            self.cfg.verification.timeout_ms,
            svc.verify(payload),
        )
        .await?;
        Confidence::new(result.confidence)?;
        Ok(result)
    }

    async fn confidence_inner(&self, claim: &str) -> Result<Confidence, ServiceError> {
        let claim = require_text("claim", claim)?;
        let svc = self.verification()?;
        let score = bounded(
            VERIFICATION,
            self.cfg.verification.timeout_ms,
            svc.confidence_score(claim.to_string()),
        )
        .await?;
        Confidence::new(score)
    }

    // ============= Lookup =============

    fn graphrag(&self) -> Result<&Arc<dyn GraphRagService>, ServiceError> {
        let svc = self.services.graphrag.as_ref();
        lookup(GRAPHRAG, self.cfg.graphrag.enabled, svc)
    }

    fn memory(&self) -> Result<&Arc<dyn MemoryService>, ServiceError> {
        let svc = self.services.memory.as_ref();
        lookup(MEMORY, self.cfg.memory.enabled, svc)
    }

    fn verification(&self) -> Result<&Arc<dyn VerificationService>, ServiceError> {
        let svc = self.services.verification.as_ref();
        lookup(VERIFICATION, self.cfg.verification.enabled, svc)
    }
}

fn lookup<'a, T: ?Sized>(
    service: &'static str,
    enabled: bool,
    svc: Option<&'a Arc<T>>,
) -> Result<&'a Arc<T>, ServiceError> {
    match svc {
        Some(svc) if enabled => Ok(svc),
        _ => Err(ServiceError::Unavailable { service }),
    }
}

fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::invalid(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

async fn bounded<T, F>(service: &'static str, timeout_ms: u64, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(result) => result.map_err(ServiceError::Backend),
        Err(_) => Err(ServiceError::Timeout {
            service,
            timeout_ms,
        }),
    }
}

async fn respond<T, F>(service: &'static str, op: &'static str, fut: F) -> ServiceResponse<T>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    let span = tracing::info_span!("call", service, op, request_id = %Uuid::new_v4());
    async move {
        let started = Instant::now();
        let result = fut.await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(elapsed_ms, "call succeeded"),
            Err(err) => tracing::warn!(elapsed_ms, code = err.code(), "call failed: {}", err),
        }
        ServiceResponse::from_result(result)
    }
    .instrument(span)
    .await
}
