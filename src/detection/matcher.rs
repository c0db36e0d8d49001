//! Pattern matcher.
//!
//! Scans case-normalized text against the layered rule sets. Every rule that
//! matches contributes one `PatternMatch` (its first occurrence), in rule
//! order: general rules first, then the channel set.

use crate::detection::rules::{channel_rules, general_rules, PatternRule};
use crate::logging::structured::LogContext;
use crate::models::content::ContentType;
use crate::models::findings::PatternMatch;

/// Lower-case the text and fold typographic apostrophes.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

/// Match `text` against the general rules plus the channel rules for
/// `content_type`.
///
/// Empty or whitespace-only text yields no matches.
pub fn match_patterns(text: &str, content_type: ContentType, ctx: &LogContext) -> Vec<PatternMatch> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let normalized = normalize_text(text);
    let mut matches = Vec::new();

    scan_rules(&normalized, general_rules(), ctx, &mut matches);
    scan_rules(&normalized, channel_rules(content_type), ctx, &mut matches);

    log::debug!(
        "{} PATTERN_SCAN_COMPLETE content_type={} matches={}",
        ctx,
        content_type,
        matches.len()
    );

    matches
}

fn scan_rules(normalized: &str, rules: &[PatternRule], ctx: &LogContext, out: &mut Vec<PatternMatch>) {
    for rule in rules {
        if let Some(found) = rule.regex.find(normalized) {
            let spec = rule.category.spec();
            log::debug!(
                "{} PATTERN_MATCHED category={} pattern={}",
                ctx,
                spec.tag,
                rule.regex.as_str()
            );
            out.push(PatternMatch {
                category: rule.category,
                snippet: found.as_str().to_string(),
                description: spec.description,
                weight: spec.severity_weight,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::categories::Category;

    fn ctx() -> LogContext {
        LogContext::new("test-req")
    }

    #[test]
    fn test_empty_text_has_no_matches() {
        assert!(match_patterns("", ContentType::Email, &ctx()).is_empty());
        assert!(match_patterns("   \n\t", ContentType::Email, &ctx()).is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let matches = match_patterns("HURRY, LAST CHANCE!", ContentType::General, &ctx());
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.category == Category::UrgencyManipulation));
        assert_eq!(matches[0].snippet, "hurry");
    }

    #[test]
    fn test_typographic_apostrophe() {
        let matches = match_patterns("Don\u{2019}t miss this", ContentType::General, &ctx());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, Category::PsychologicalPressure);
    }

    #[test]
    fn test_channel_rules_only_for_matching_channel() {
        let text = "Tag a friend who needs this";
        let social = match_patterns(text, ContentType::Social, &ctx());
        assert_eq!(social.len(), 1);
        assert_eq!(social[0].category, Category::EngagementBaiting);

        assert!(match_patterns(text, ContentType::General, &ctx()).is_empty());
        assert!(match_patterns(text, ContentType::Email, &ctx()).is_empty());
    }

    #[test]
    fn test_all_matching_rules_returned() {
        let matches = match_patterns(
            "Act now, this offer expires soon, guaranteed!",
            ContentType::Email,
            &ctx(),
        );
        let categories: Vec<Category> = matches.iter().map(|m| m.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::UrgencyManipulation,
                Category::UrgencyManipulation,
                Category::UnsubstantiatedClaims,
                Category::EmailSpamIndicators,
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Only 3 left! Free shipping, act fast.";
        let first = match_patterns(text, ContentType::Ad, &ctx());
        let second = match_patterns(text, ContentType::Ad, &ctx());
        assert_eq!(first, second);
    }
}
