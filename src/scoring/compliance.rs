//! Compliance and marketing-quality scores.
//!
//! Both scores start at 100 and lose the table penalty of every distinct
//! attack type. Compliance also pays heavily for PII exposure; marketing
//! pays more for channel-specific manipulation.

use serde::{Deserialize, Serialize};

use crate::detection::categories::Category;
use crate::models::content::ContentType;
use crate::models::verdict::ThreatVerdict;

pub const SCORE_CEILING: i32 = 100;

/// Compliance penalty per distinct PII type found.
pub const COMPLIANCE_PII_TYPE_PENALTY: i32 = 10;
/// Compliance penalty per PII instance found.
pub const COMPLIANCE_PII_INSTANCE_PENALTY: i32 = 5;
/// Marketing penalty per distinct PII type found.
pub const MARKETING_PII_TYPE_PENALTY: i32 = 2;

/// The two auxiliary 0-100 scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentScores {
    pub compliance: u8,
    pub marketing: u8,
}

/// Marketing penalty for `category` on `content_type`.
///
/// Promotional wording is expected in ads and costs half as much there.
fn marketing_penalty(category: Category, content_type: ContentType) -> i32 {
    let base = category.spec().marketing_penalty;
    match (category, content_type) {
        (Category::PromotionalLanguage, ContentType::Ad) => base / 2,
        _ => base,
    }
}

fn to_score(value: i32) -> u8 {
    value.clamp(0, SCORE_CEILING) as u8
}

/// Derive compliance and marketing scores from a verdict.
pub fn score_content(verdict: &ThreatVerdict, content_type: ContentType) -> ContentScores {
    let mut compliance = SCORE_CEILING;
    let mut marketing = SCORE_CEILING;

    for category in &verdict.attack_types {
        compliance -= category.spec().compliance_penalty;
        marketing -= marketing_penalty(*category, content_type);
    }

    let pii_types = verdict.pii.types_found as i32;
    let pii_count = verdict.pii.total_count.min(SCORE_CEILING as usize) as i32;
    compliance -= pii_types * COMPLIANCE_PII_TYPE_PENALTY + pii_count * COMPLIANCE_PII_INSTANCE_PENALTY;
    marketing -= pii_types * MARKETING_PII_TYPE_PENALTY;

    ContentScores {
        compliance: to_score(compliance),
        marketing: to_score(marketing),
    }
}
