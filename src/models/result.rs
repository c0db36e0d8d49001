//! Response envelopes.
//!
//! Field names match the wire contract consumed by the presentation layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::categories::Category;
use crate::error::{AnalysisError, Result};
use crate::models::content::ContentType;
use crate::models::verdict::ThreatLevel;

/// Degradation marker recorded when no ML signal was available.
pub const DEGRADED_ML_UNAVAILABLE: &str = "ml_score_unavailable";

/// Per-request metadata attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub request_id: String,
    pub content_length: usize,
    /// SHA-256 of the content, usable as a cache key.
    pub content_hash: String,
    pub pattern_score: f64,
    pub ml_score: Option<f64>,
    #[serde(default)]
    pub ml_latency_ms: Option<f64>,
    pub client_id: String,
    pub timestamp: DateTime<Utc>,
    pub pii_types_found: usize,
    pub pii_count: usize,
    #[serde(default)]
    pub degraded: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_kind: Option<String>,
}

/// Full analysis of one content item. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_malicious: bool,
    pub threat_level: ThreatLevel,
    pub confidence: f64,
    pub attack_types: Vec<Category>,
    pub flagged_patterns: Vec<String>,
    /// Wall-clock analysis time in milliseconds.
    pub processing_time: f64,
    pub recommendation: String,
    pub pii_detected: BTreeMap<String, usize>,
    pub metadata: ResultMetadata,
    pub content_type: ContentType,
    pub compliance_score: u8,
    pub marketing_score: u8,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// True when the result was produced without the ML signal.
    pub fn is_degraded(&self) -> bool {
        !self.metadata.degraded.is_empty()
    }

    /// Gate for content generation and publishing: only `safe` content passes.
    pub fn ensure_publishable(&self) -> Result<()> {
        match self.threat_level {
            ThreatLevel::Safe => Ok(()),
            level => Err(AnalysisError::NotPublishable(level)),
        }
    }
}

/// Error marker for one batch index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemError {
    pub index: usize,
    #[serde(default)]
    pub filename: Option<String>,
    /// Wire code, e.g. `extraction_failed`.
    pub error: String,
    pub message: String,
}

impl BatchItemError {
    pub fn new(index: usize, filename: Option<String>, err: &AnalysisError) -> Self {
        Self {
            index,
            filename,
            error: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// One index-aligned batch entry: `{"analysis": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchEntry {
    Analysis(Box<AnalysisResult>),
    Error(BatchItemError),
}

impl BatchEntry {
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match self {
            BatchEntry::Analysis(result) => Some(result),
            BatchEntry::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&BatchItemError> {
        match self {
            BatchEntry::Analysis(_) => None,
            BatchEntry::Error(err) => Some(err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BatchEntry::Error(_))
    }
}

/// Ordered results for a batch, index-aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: String,
    pub entries: Vec<BatchEntry>,
    pub succeeded: usize,
    pub failed: usize,
    /// Wall-clock batch time in milliseconds.
    pub processing_time: f64,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest threat level among the successful entries.
    pub fn max_threat_level(&self) -> ThreatLevel {
        self.entries
            .iter()
            .filter_map(BatchEntry::analysis)
            .map(|r| r.threat_level)
            .max()
            .unwrap_or_default()
    }
}
