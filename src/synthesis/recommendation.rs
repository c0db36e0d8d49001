//! Recommendation templates and suggestion assembly.

use serde::{Deserialize, Serialize};

use crate::models::verdict::{ThreatLevel, ThreatVerdict};

pub const SAFE_RECOMMENDATION: &str = "Content appears to be safe for marketing use. It follows ethical guidelines and doesn't contain manipulative language.";
pub const LOW_RECOMMENDATION: &str = "LOW RISK: Minor issues detected. Content is broadly compliant; review the flagged phrasing before publishing.";
pub const MEDIUM_RECOMMENDATION: &str = "WARN: Potentially risky content. While not explicitly harmful, consider toning down promotional language for better compliance.";
pub const HIGH_RECOMMENDATION: &str = "HIGH RISK: Content contains high-risk elements that could be considered manipulative. Consider rephrasing to be more transparent and less pressuring.";
pub const CRITICAL_RECOMMENDATION: &str = "CRITICAL: Content combines manipulative tactics with serious compliance exposure. Do not publish without substantial revision.";

pub const PII_REMEDIATION: &str = "Remove or mask personal data such as email addresses, phone numbers and ID numbers";

/// Recommendation text plus de-duplicated suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub suggestions: Vec<String>,
}

/// Template for a threat level.
pub fn recommendation_text(level: ThreatLevel) -> &'static str {
    match level {
        ThreatLevel::Safe => SAFE_RECOMMENDATION,
        ThreatLevel::Low => LOW_RECOMMENDATION,
        ThreatLevel::Medium => MEDIUM_RECOMMENDATION,
        ThreatLevel::High => HIGH_RECOMMENDATION,
        ThreatLevel::Critical => CRITICAL_RECOMMENDATION,
    }
}

fn push_unique(suggestions: &mut Vec<String>, suggestion: &str) {
    if !suggestions.iter().any(|s| s == suggestion) {
        suggestions.push(suggestion.to_string());
    }
}

/// Build the recommendation for a verdict. Safe content gets no suggestions.
pub fn synthesize(verdict: &ThreatVerdict) -> Recommendation {
    let mut suggestions = Vec::new();

    if verdict.is_flagged() {
        for category in &verdict.attack_types {
            for remediation in category.spec().remediation {
                push_unique(&mut suggestions, remediation);
            }
        }
        if verdict.pii_escalated {
            push_unique(&mut suggestions, PII_REMEDIATION);
        }
    }

    Recommendation {
        text: recommendation_text(verdict.threat_level).to_string(),
        suggestions,
    }
}
