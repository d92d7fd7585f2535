//! Response envelope shared by every facade operation.
//!
//! Contract calls never surface as `Err` to facade callers; the outcome is
//! folded into a [`ServiceResponse`] carrying the common [`BaseResponse`] fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::graphrag::IndexSummary;
use crate::memory::{MemoryAdded, MemoryResult};
use crate::verification::{Confidence, VerificationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl Default for BaseResponse {
    fn default() -> Self {
        Self {
            success: true,
            error_message: None,
            timestamp: Utc::now(),
        }
    }
}

impl BaseResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub base: BaseResponse,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            base: BaseResponse::default(),
            error_code: None,
            data: Some(data),
        }
    }

    pub fn failure(err: &ServiceError) -> Self {
        Self {
            base: BaseResponse::failed(err.to_string()),
            error_code: Some(err.code().to_string()),
            data: None,
        }
    }

    pub fn from_result(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failure(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.base.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.base.error_message.as_deref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

pub type QueryResponse = ServiceResponse<String>;
pub type IndexResponse = ServiceResponse<IndexSummary>;
pub type MemorySearchResponse = ServiceResponse<Vec<MemoryResult>>;
pub type AddMemoryResponse = ServiceResponse<MemoryAdded>;
pub type VerificationResponse = ServiceResponse<VerificationResult>;
pub type ConfidenceResponse = ServiceResponse<Confidence>;
