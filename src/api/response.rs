//! Response envelopes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::request::AnalyzeRequest;
use crate::error::AnalysisError;
use crate::models::result::{AnalysisResult, BatchEntry, BatchResult};
use crate::pipeline::orchestrator::Analyzer;

/// Successful single-item response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub analysis: AnalysisResult,
    /// Milliseconds, same as `analysis.processing_time`.
    pub processing_time: f64,
    pub request_id: String,
}

impl AnalysisResponse {
    pub fn new(analysis: AnalysisResult) -> Self {
        Self {
            success: true,
            timestamp: analysis.metadata.timestamp,
            processing_time: analysis.processing_time,
            request_id: analysis.metadata.request_id.clone(),
            analysis,
        }
    }
}

/// Error body: `{ "error": "invalid_input", "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Error body plus the status the service layer should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub body: ErrorBody,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            status: err.status_code(),
            body: ErrorBody {
                error: err.code().to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Response to a file upload.
///
/// A single successfully analysed file is returned bare; anything else is an
/// ordered array aligned with the upload order. Both shapes deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileAnalysisResponse {
    Single(Box<AnalysisResult>),
    Batch(Vec<BatchEntry>),
}

impl FileAnalysisResponse {
    pub fn from_batch(batch: BatchResult) -> Self {
        let mut entries = batch.entries;
        // A lone failure keeps the array shape so its error marker survives
        if entries.len() == 1 && !entries[0].is_error() {
            if let Some(BatchEntry::Analysis(result)) = entries.pop() {
                return FileAnalysisResponse::Single(result);
            }
        }
        FileAnalysisResponse::Batch(entries)
    }

    /// Entries in upload order, whichever shape was received.
    pub fn into_entries(self) -> Vec<BatchEntry> {
        match self {
            FileAnalysisResponse::Single(result) => vec![BatchEntry::Analysis(result)],
            FileAnalysisResponse::Batch(entries) => entries,
        }
    }
}

/// Run a single-item request end to end.
pub fn handle_analyze(
    analyzer: &Analyzer,
    request: &AnalyzeRequest,
) -> Result<AnalysisResponse, ErrorResponse> {
    let analysis = analyzer
        .analyze(&request.to_item())
        .map_err(|e| ErrorResponse::from(&e))?;

    let analysis = if request.include_pii {
        analysis
    } else {
        AnalysisResult {
            pii_detected: BTreeMap::new(),
            ..analysis
        }
    };

    Ok(AnalysisResponse::new(analysis))
}
