use crate::verification::models::{VerificationResult, VerifyPayload};
use async_trait::async_trait;

/// Fact verification and grounding against trusted sources.
#[async_trait]
pub trait VerificationService: Send + Sync {
    fn name(&self) -> &str;

    async fn verify(&self, payload: VerifyPayload) -> anyhow::Result<VerificationResult>;

    /// Confidence for a factual claim, expected in `[0, 1]`.
    async fn confidence_score(&self, claim: String) -> anyhow::Result<f32>;
}
