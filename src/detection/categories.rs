//! Pattern categories and their static configuration.
//!
//! Adding a category means adding a variant and one `CATEGORY_TABLE` row;
//! scoring and recommendation read everything from the table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag of a matched rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UrgencyManipulation,
    FalseScarcity,
    PsychologicalPressure,
    UnsubstantiatedClaims,
    PromotionalLanguage,
    EmailSpamIndicators,
    EngagementBaiting,
    Clickbait,
    DeceptiveAdvertising,
}

/// Static configuration for one category.
#[derive(Debug)]
pub struct CategorySpec {
    pub category: Category,
    pub tag: &'static str,
    pub description: &'static str,
    pub severity_weight: f64,
    pub compliance_penalty: i32,
    pub marketing_penalty: i32,
    pub remediation: &'static [&'static str],
}

const GIVE_TIME: &str = "Give readers time to make an informed decision";
const BACK_UP_CLAIMS: &str = "Back up guarantees and claims with verifiable evidence, or remove them";

pub static CATEGORY_TABLE: [CategorySpec; 9] = [
    CategorySpec {
        category: Category::UrgencyManipulation,
        tag: "urgency_manipulation",
        description: "False urgency claim",
        severity_weight: 0.40,
        compliance_penalty: 15,
        marketing_penalty: 20,
        remediation: &[
            "Remove artificial deadlines and time-pressure language",
            GIVE_TIME,
        ],
    },
    CategorySpec {
        category: Category::FalseScarcity,
        tag: "false_scarcity",
        description: "Scarcity manipulation",
        severity_weight: 0.35,
        compliance_penalty: 15,
        marketing_penalty: 20,
        remediation: &["Only state stock or availability limits that are accurate and verifiable"],
    },
    CategorySpec {
        category: Category::PsychologicalPressure,
        tag: "psychological_pressure",
        description: "Psychological pressure tactics",
        severity_weight: 0.40,
        compliance_penalty: 20,
        marketing_penalty: 20,
        remediation: &[
            "Replace pressure phrases with a clear description of the value offered",
            GIVE_TIME,
        ],
    },
    CategorySpec {
        category: Category::UnsubstantiatedClaims,
        tag: "unsubstantiated_claims",
        description: "Unsubstantiated claim",
        severity_weight: 0.30,
        compliance_penalty: 20,
        marketing_penalty: 10,
        remediation: &[BACK_UP_CLAIMS],
    },
    CategorySpec {
        category: Category::PromotionalLanguage,
        tag: "promotional_language",
        description: "Promotional language detected",
        severity_weight: 0.15,
        compliance_penalty: 5,
        marketing_penalty: 10,
        remediation: &["Tone down superlatives and focus on concrete benefits"],
    },
    CategorySpec {
        category: Category::EmailSpamIndicators,
        tag: "email_spam_indicators",
        description: "Spam trigger phrase",
        severity_weight: 0.25,
        compliance_penalty: 10,
        marketing_penalty: 15,
        remediation: &[
            "Avoid spam-trigger phrases that hurt deliverability",
            "Use an honest subject line and a plain call to action",
        ],
    },
    CategorySpec {
        category: Category::EngagementBaiting,
        tag: "engagement_baiting",
        description: "Engagement bait",
        severity_weight: 0.25,
        compliance_penalty: 5,
        marketing_penalty: 25,
        remediation: &["Invite engagement without bait such as \"tag a friend\" or \"like and share\""],
    },
    CategorySpec {
        category: Category::Clickbait,
        tag: "clickbait",
        description: "Clickbait headline",
        severity_weight: 0.25,
        compliance_penalty: 5,
        marketing_penalty: 20,
        remediation: &["Make headlines accurately describe the article content"],
    },
    CategorySpec {
        category: Category::DeceptiveAdvertising,
        tag: "deceptive_advertising",
        description: "Deceptive advertising claim",
        severity_weight: 0.35,
        compliance_penalty: 25,
        marketing_penalty: 15,
        remediation: &[
            "Make sure ad claims meet advertising standards and include required disclosures",
            BACK_UP_CLAIMS,
        ],
    },
];

impl Category {
    pub fn spec(&self) -> &'static CategorySpec {
        // Table rows are declared in variant order
        &CATEGORY_TABLE[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.spec().tag
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
