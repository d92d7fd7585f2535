pub mod models;
pub mod r#trait;

pub use models::{Confidence, VerificationResult, VerifyPayload};
pub use r#trait::VerificationService;
