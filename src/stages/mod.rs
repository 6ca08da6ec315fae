//! The five pipeline stages, in execution order.
//!
//! Ingestion → Metric → Alert → Recommendation → Report. Each stage consumes
//! the previous stage's state type and returns a successor with more fields;
//! see `crate::models` for the state types and `crate::pipeline` for the
//! runner that threads them together.

pub mod alerts;
pub mod ingest;
pub mod metrics;
pub mod recommend;
pub mod report;
