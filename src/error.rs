//! Error taxonomy for the analysis pipeline.
//!
//! Every failure is per-request. Nothing here is fatal to the process.

use thiserror::Error;

use crate::models::verdict::ThreatLevel;

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Empty, whitespace-only, oversized or otherwise unusable input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Document-to-text conversion failed in the extraction collaborator.
    #[error("text extraction failed for {filename}: {reason}")]
    Extraction { filename: String, reason: String },

    /// The external ML signal could not be obtained.
    ///
    /// The orchestrator never returns this to callers; it degrades to
    /// pattern-only fusion and records the degradation in the result.
    #[error("upstream ML scoring unavailable: {0}")]
    UpstreamScoringUnavailable(String),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Content was analysed but is not safe enough to hand to generation or
    /// publishing.
    #[error("content is not publishable at threat level {0}")]
    NotPublishable(ThreatLevel),
}

impl AnalysisError {
    /// Wrap an extraction collaborator failure, keeping the full cause chain.
    pub fn extraction(filename: &str, err: &anyhow::Error) -> Self {
        AnalysisError::Extraction {
            filename: filename.to_string(),
            reason: format!("{:#}", err),
        }
    }

    /// Stable wire code used in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput(_) => "invalid_input",
            AnalysisError::Extraction { .. } => "extraction_failed",
            AnalysisError::UpstreamScoringUnavailable(_) => "scoring_unavailable",
            AnalysisError::Config(_) => "invalid_config",
            AnalysisError::NotPublishable(_) => "not_publishable",
        }
    }

    /// HTTP-style status for the outer service layer.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalysisError::InvalidInput(_) => 400,
            AnalysisError::Extraction { .. } => 422,
            AnalysisError::UpstreamScoringUnavailable(_) => 503,
            AnalysisError::Config(_) => 500,
            AnalysisError::NotPublishable(_) => 409,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
