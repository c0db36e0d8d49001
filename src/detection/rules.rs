//! Pattern rule sets.
//!
//! The general set applies to every content type. Channel sets are appended
//! only for the channel they are keyed by. Rules run against lower-cased
//! text, so every source here is lower case.

use lazy_static::lazy_static;
use regex::Regex;

use crate::detection::categories::Category;
use crate::models::content::ContentType;

/// How a rule is written.
#[derive(Debug, Clone, Copy)]
pub enum RuleSource {
    /// Literal phrase, matched on word boundaries.
    Phrase(&'static str),
    /// Raw regular expression.
    Pattern(&'static str),
}

/// A compiled detection rule.
#[derive(Debug)]
pub struct PatternRule {
    pub category: Category,
    pub regex: Regex,
}

impl PatternRule {
    fn compile(category: Category, source: RuleSource) -> Self {
        let expr = match source {
            RuleSource::Phrase(phrase) => format!(r"\b{}\b", regex::escape(phrase)),
            RuleSource::Pattern(pattern) => pattern.to_string(),
        };
        Self {
            category,
            regex: Regex::new(&expr).unwrap(),
        }
    }
}

use Category::*;
use RuleSource::{Pattern, Phrase};

const GENERAL_RULES: &[(Category, RuleSource)] = &[
    (UrgencyManipulation, Phrase("urgent")),
    (UrgencyManipulation, Phrase("act now")),
    (UrgencyManipulation, Phrase("act fast")),
    (UrgencyManipulation, Phrase("limited time")),
    (UrgencyManipulation, Phrase("expires")),
    (UrgencyManipulation, Phrase("expiring")),
    (UrgencyManipulation, Phrase("discount ends")),
    (UrgencyManipulation, Phrase("offer ends")),
    (UrgencyManipulation, Phrase("hurry")),
    (UrgencyManipulation, Phrase("last chance")),
    (UrgencyManipulation, Phrase("don't wait")),
    (UrgencyManipulation, Phrase("dont wait")),
    (UrgencyManipulation, Phrase("today only")),
    (UrgencyManipulation, Phrase("ends tonight")),
    (UrgencyManipulation, Phrase("now or never")),
    (UrgencyManipulation, Pattern(r"\bonly \d+ (?:minutes?|hours?|days?) left\b")),
    (UrgencyManipulation, Pattern(r"\bends in \d+ (?:minutes?|hours?|days?)\b")),
    (FalseScarcity, Phrase("limited stock")),
    (FalseScarcity, Phrase("while supplies last")),
    (FalseScarcity, Phrase("selling fast")),
    (FalseScarcity, Phrase("almost gone")),
    (FalseScarcity, Phrase("only a few left")),
    (FalseScarcity, Phrase("limited availability")),
    (FalseScarcity, Phrase("won't last")),
    (FalseScarcity, Phrase("wont last")),
    (FalseScarcity, Pattern(r"\bonly \d+ (?:left|remaining|spots?|seats?)\b")),
    (PsychologicalPressure, Phrase("you must")),
    (PsychologicalPressure, Phrase("don't miss")),
    (PsychologicalPressure, Phrase("dont miss")),
    (PsychologicalPressure, Phrase("everyone is")),
    (PsychologicalPressure, Phrase("secret")),
    (PsychologicalPressure, Phrase("exclusive")),
    (PsychologicalPressure, Phrase("you'll regret")),
    (PsychologicalPressure, Phrase("you will regret")),
    (PsychologicalPressure, Phrase("only fools")),
    (PsychologicalPressure, Phrase("what are you waiting for")),
    (PsychologicalPressure, Phrase("don't be left behind")),
    (UnsubstantiatedClaims, Phrase("guaranteed")),
    (UnsubstantiatedClaims, Phrase("guarantee")),
    (UnsubstantiatedClaims, Phrase("no risk")),
    (UnsubstantiatedClaims, Phrase("scientifically proven")),
    (UnsubstantiatedClaims, Phrase("clinically proven")),
    (UnsubstantiatedClaims, Phrase("instant results")),
    (UnsubstantiatedClaims, Phrase("overnight success")),
    (UnsubstantiatedClaims, Pattern(r"\b100% (?:effective|success|safe)\b")),
    (PromotionalLanguage, Phrase("free")),
    (PromotionalLanguage, Phrase("amazing deal")),
    (PromotionalLanguage, Phrase("incredible offer")),
    (PromotionalLanguage, Phrase("best deal")),
    (PromotionalLanguage, Phrase("special offer")),
    (PromotionalLanguage, Phrase("lowest price")),
    (PromotionalLanguage, Phrase("best price")),
    (PromotionalLanguage, Phrase("save big")),
    (PromotionalLanguage, Phrase("huge discount")),
    (PromotionalLanguage, Phrase("unbeatable")),
    (PromotionalLanguage, Phrase("once in a lifetime")),
];

const EMAIL_RULES: &[(Category, RuleSource)] = &[
    (EmailSpamIndicators, Phrase("act now")),
    (EmailSpamIndicators, Phrase("urgent")),
    (EmailSpamIndicators, Phrase("click here")),
    (EmailSpamIndicators, Phrase("order now")),
    (EmailSpamIndicators, Phrase("buy now")),
    (EmailSpamIndicators, Phrase("winner")),
    (EmailSpamIndicators, Phrase("congratulations")),
    (EmailSpamIndicators, Phrase("cash bonus")),
    (EmailSpamIndicators, Phrase("100% free")),
    (EmailSpamIndicators, Phrase("no obligation")),
    (EmailSpamIndicators, Phrase("risk-free")),
    (EmailSpamIndicators, Phrase("dear friend")),
    (EmailSpamIndicators, Phrase("limited offer")),
    (EmailSpamIndicators, Phrase("open immediately")),
    (EmailSpamIndicators, Phrase("you have been selected")),
];

const SOCIAL_RULES: &[(Category, RuleSource)] = &[
    (EngagementBaiting, Phrase("tag a friend")),
    (EngagementBaiting, Phrase("tag someone")),
    (EngagementBaiting, Phrase("like and share")),
    (EngagementBaiting, Phrase("like if you")),
    (EngagementBaiting, Phrase("share this")),
    (EngagementBaiting, Phrase("share if you agree")),
    (EngagementBaiting, Phrase("comment below")),
    (EngagementBaiting, Phrase("comment yes")),
    (EngagementBaiting, Phrase("follow for more")),
    (EngagementBaiting, Phrase("double tap")),
    (EngagementBaiting, Phrase("smash that like")),
    (EngagementBaiting, Pattern(r"\btype \w+ in the comments\b")),
];

const BLOG_RULES: &[(Category, RuleSource)] = &[
    (Clickbait, Phrase("you won't believe")),
    (Clickbait, Phrase("you wont believe")),
    (Clickbait, Phrase("this one trick")),
    (Clickbait, Phrase("doctors hate")),
    (Clickbait, Phrase("what happened next")),
    (Clickbait, Phrase("will shock you")),
    (Clickbait, Phrase("mind-blowing")),
    (Clickbait, Phrase("the truth about")),
    (Clickbait, Phrase("nobody tells you")),
];

const AD_RULES: &[(Category, RuleSource)] = &[
    (DeceptiveAdvertising, Phrase("risk-free")),
    (DeceptiveAdvertising, Phrase("miracle")),
    (DeceptiveAdvertising, Phrase("no strings attached")),
    (DeceptiveAdvertising, Phrase("lowest price ever")),
    (DeceptiveAdvertising, Phrase("lose weight fast")),
    (DeceptiveAdvertising, Phrase("get rich quick")),
    (DeceptiveAdvertising, Phrase("as seen on tv")),
    (DeceptiveAdvertising, Phrase("100% satisfaction")),
    (DeceptiveAdvertising, Pattern(r"\bearn \$\d[\d,]* (?:a|per) (?:day|week|month)\b")),
];

fn compile_all(rules: &[(Category, RuleSource)]) -> Vec<PatternRule> {
    rules
        .iter()
        .map(|(category, source)| PatternRule::compile(*category, *source))
        .collect()
}

lazy_static! {
    static ref GENERAL_RULE_SET: Vec<PatternRule> = compile_all(GENERAL_RULES);
    static ref EMAIL_RULE_SET: Vec<PatternRule> = compile_all(EMAIL_RULES);
    static ref SOCIAL_RULE_SET: Vec<PatternRule> = compile_all(SOCIAL_RULES);
    static ref BLOG_RULE_SET: Vec<PatternRule> = compile_all(BLOG_RULES);
    static ref AD_RULE_SET: Vec<PatternRule> = compile_all(AD_RULES);
}

/// Rules applied to every content type.
pub fn general_rules() -> &'static [PatternRule] {
    GENERAL_RULE_SET.as_slice()
}

/// Rules appended for a specific channel; empty for non-channel types.
pub fn channel_rules(content_type: ContentType) -> &'static [PatternRule] {
    match content_type {
        ContentType::Email => EMAIL_RULE_SET.as_slice(),
        ContentType::Social => SOCIAL_RULE_SET.as_slice(),
        ContentType::Blog => BLOG_RULE_SET.as_slice(),
        ContentType::Ad => AD_RULE_SET.as_slice(),
        ContentType::General | ContentType::Document => &[],
    }
}
