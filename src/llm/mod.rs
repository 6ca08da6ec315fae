//! Language-model collaborator abstraction
//!
//! The pipeline depends on text generation but does not own it. Everything
//! goes through the single-method `ModelClient` trait so correctness tests
//! can substitute a deterministic double with no network dependency.

use crate::Result;
use async_trait::async_trait;

pub mod gemini;
pub use gemini::GeminiClient;

/// Contract for the external language model: prompt in, free text out.
/// Best-effort; callers must tolerate failure.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Deterministic model double for development & testing.
/// Always returns the same canned response.
pub struct StaticModel {
    response: String,
}

impl StaticModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for StaticModel {
    fn default() -> Self {
        Self::new(
            "1. Keep marketing spend aligned with customer growth.\n\
             2. Review supplier contracts for cost savings.\n\
             3. Track daily profit against the weekly target.",
        )
    }
}

#[async_trait]
impl ModelClient for StaticModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}

/// Model double that always fails, for exercising the fallback path.
pub struct FailingModel;

#[async_trait]
impl ModelClient for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(crate::error::AnalysisError::Collaborator(
            "model unavailable".to_string(),
        ))
    }
}
