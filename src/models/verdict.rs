//! Threat levels and the fused verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ThreatThresholds;
use crate::detection::categories::Category;
use crate::models::findings::PiiSummary;

/// Ordered severity of content risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    #[default]
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "safe",
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        }
    }

    /// Classify a blended confidence against the configured thresholds.
    pub fn from_confidence(confidence: f64, thresholds: &ThreatThresholds) -> Self {
        if confidence >= thresholds.critical {
            ThreatLevel::Critical
        } else if confidence >= thresholds.high {
            ThreatLevel::High
        } else if confidence >= thresholds.medium {
            ThreatLevel::Medium
        } else if confidence >= thresholds.low {
            ThreatLevel::Low
        } else {
            ThreatLevel::Safe
        }
    }

    /// Lowest confidence that classifies as this level.
    pub fn confidence_floor(&self, thresholds: &ThreatThresholds) -> f64 {
        match self {
            ThreatLevel::Safe => 0.0,
            ThreatLevel::Low => thresholds.low,
            ThreatLevel::Medium => thresholds.medium,
            ThreatLevel::High => thresholds.high,
            ThreatLevel::Critical => thresholds.critical,
        }
    }

    /// One step up, saturating at `Critical`.
    pub fn escalate(&self) -> Self {
        match self {
            ThreatLevel::Safe => ThreatLevel::Low,
            ThreatLevel::Low => ThreatLevel::Medium,
            ThreatLevel::Medium => ThreatLevel::High,
            ThreatLevel::High | ThreatLevel::Critical => ThreatLevel::Critical,
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fused decision for one content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatVerdict {
    pub threat_level: ThreatLevel,
    /// Blended confidence in [0, 1].
    pub confidence: f64,
    pub pattern_score: f64,
    /// `None` when the external ML signal was unavailable.
    pub ml_score: Option<f64>,
    /// Distinct matched categories in first-seen order.
    pub attack_types: Vec<Category>,
    pub flagged_patterns: Vec<String>,
    /// True when PII exposure raised the level.
    pub pii_escalated: bool,
    pub pii: PiiSummary,
}

impl ThreatVerdict {
    /// Derived from the level only; there is no independent flag.
    pub fn is_flagged(&self) -> bool {
        self.threat_level > ThreatLevel::Safe
    }
}
