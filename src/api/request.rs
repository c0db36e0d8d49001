//! Analysis requests.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::content::{ContentItem, ContentType};

fn default_include_pii() -> bool {
    true
}

/// Body of a single-item analysis request.
///
/// Older clients send the text under `prompt`; both keys are accepted.
/// Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(alias = "prompt")]
    pub content: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub user_id: Option<String>,
    /// When false the per-type PII counts are left out of the response.
    #[serde(default = "default_include_pii")]
    pub include_pii: bool,
    #[serde(default)]
    pub ml_score: Option<f64>,
}

impl AnalyzeRequest {
    pub fn new(content: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            content: content.into(),
            content_type,
            user_id: None,
            include_pii: true,
            ml_score: None,
        }
    }

    /// Parse a JSON request body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| AnalysisError::InvalidInput(format!("malformed request: {}", e)))
    }

    pub fn to_item(&self) -> ContentItem {
        ContentItem {
            text: self.content.clone(),
            content_type: self.content_type,
            filename: None,
            user_id: self.user_id.clone(),
            ml_score: self.ml_score,
        }
    }
}
