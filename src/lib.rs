//! Daily Business Analytics
//!
//! A five-stage analytics pipeline for small-business operators:
//! - Validates two days of coarse metrics (revenue, cost, customers,
//!   marketing spend)
//! - Computes derived financial/customer metrics with defined
//!   zero-denominator behavior
//! - Evaluates a fixed, ordered table of alert rules
//! - Generates narrative recommendations via an LLM, with a deterministic
//!   fallback when the model is unavailable
//! - Assembles a JSON-serializable report
//!
//! PIPELINE:
//! INGEST → COMPUTE → ALERT → RECOMMEND → REPORT

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use error::{AnalysisError, Result};

// Re-export common types
pub use config::{AlertThresholds, ModelConfig, PipelineConfig};
pub use models::*;
pub use pipeline::Pipeline;
