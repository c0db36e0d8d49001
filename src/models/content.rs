//! Content items submitted for analysis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Channel the content is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    General,
    Email,
    Social,
    Blog,
    Ad,
    Document,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::General,
        ContentType::Email,
        ContentType::Social,
        ContentType::Blog,
        ContentType::Ad,
        ContentType::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::General => "general",
            ContentType::Email => "email",
            ContentType::Social => "social",
            ContentType::Blog => "blog",
            ContentType::Ad => "ad",
            ContentType::Document => "document",
        }
    }

    /// True for content types that carry a channel-specific rule set.
    pub fn is_channel(&self) -> bool {
        matches!(
            self,
            ContentType::Email | ContentType::Social | ContentType::Blog | ContentType::Ad
        )
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ContentType::ALL
            .iter()
            .copied()
            .find(|ct| ct.as_str() == normalized)
            .ok_or_else(|| AnalysisError::InvalidInput(format!("unknown content type: {:?}", s)))
    }
}

/// One unit of content to analyse. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub text: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Externally supplied ML score, if the caller already has one.
    #[serde(default)]
    pub ml_score: Option<f64>,
}

impl ContentItem {
    pub fn new(text: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            text: text.into(),
            content_type,
            filename: None,
            user_id: None,
            ml_score: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_ml_score(mut self, score: f64) -> Self {
        self.ml_score = Some(score);
        self
    }

    /// Length in characters, as reported in result metadata.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
