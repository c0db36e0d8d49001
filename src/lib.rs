//! AdShield Core - Content risk-assessment engine
//!
//! Given marketing text (or text extracted from an uploaded document), this
//! crate produces a structured verdict: how risky the content is, which
//! manipulative patterns it contains, how compliant it is, and what to change.
//!
//! 1. **Determinism** - Identical input always yields an identical verdict
//! 2. **Logging** - Every decision point logged with request context
//! 3. **Isolation** - Failures are per-request; batches never abort
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `detection` - Pattern rule sets, matcher and PII detection
//! - `scoring` - Score fusion, compliance and marketing scores
//! - `synthesis` - Recommendation text and suggestions
//! - `pipeline` - Single-item orchestrator and batch aggregator
//! - `api` - Request/response contract for the presentation layer
//! - `models` - Data model shared by all stages
//! - `config` - Thresholds and tuning surface
//! - `logging` - Structured logging with request context
//!
//! Python bindings are available behind the `python` feature.

pub mod api;
pub mod config;
pub mod detection;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod synthesis;

#[cfg(feature = "python")]
mod python;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use models::{AnalysisResult, BatchEntry, BatchResult, ContentItem, ContentType, ThreatLevel};
pub use pipeline::{Analyzer, BatchOptions};
