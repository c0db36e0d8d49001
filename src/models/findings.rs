//! Detector outputs: pattern matches and PII findings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detection::categories::Category;

/// One matched rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMatch {
    pub category: Category,
    /// Literal matched text, taken from the case-normalized content.
    pub snippet: String,
    pub description: &'static str,
    /// Base severity weight of the rule.
    pub weight: f64,
}

impl PatternMatch {
    /// Human-readable description used in `flagged_patterns`.
    pub fn flagged_description(&self) -> String {
        format!("{} (\"{}\")", self.description, self.snippet)
    }
}

/// Kinds of personally identifiable information the detector recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiType {
    Email,
    CreditCard,
    NationalId,
    Phone,
    IpAddress,
}

impl PiiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiType::Email => "email",
            PiiType::CreditCard => "credit_card",
            PiiType::NationalId => "national_id",
            PiiType::Phone => "phone",
            PiiType::IpAddress => "ip_address",
        }
    }

    /// Replacement token used by redaction.
    pub fn placeholder(&self) -> &'static str {
        match self {
            PiiType::Email => "[EMAIL]",
            PiiType::CreditCard => "[CREDIT_CARD]",
            PiiType::NationalId => "[NATIONAL_ID]",
            PiiType::Phone => "[PHONE]",
            PiiType::IpAddress => "[IP_ADDRESS]",
        }
    }
}

/// Occurrences of one PII type. The matched values are never kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiFinding {
    pub pii_type: PiiType,
    pub count: usize,
}

/// Aggregate of all PII findings for one piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiSummary {
    pub findings: Vec<PiiFinding>,
    pub types_found: usize,
    pub total_count: usize,
}

impl PiiSummary {
    /// Build a summary, dropping zero-count findings.
    pub fn from_findings(findings: Vec<PiiFinding>) -> Self {
        let findings: Vec<PiiFinding> = findings.into_iter().filter(|f| f.count > 0).collect();
        Self {
            types_found: findings.len(),
            total_count: findings.iter().map(|f| f.count).sum(),
            findings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn count_of(&self, pii_type: PiiType) -> usize {
        self.findings
            .iter()
            .filter(|f| f.pii_type == pii_type)
            .map(|f| f.count)
            .sum()
    }

    /// `type -> count` map for the response body.
    pub fn counts_map(&self) -> BTreeMap<String, usize> {
        self.findings
            .iter()
            .map(|f| (f.pii_type.as_str().to_string(), f.count))
            .collect()
    }
}
