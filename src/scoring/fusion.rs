//! Score fusion.
//!
//! Combines the pattern signal, the optional external ML signal and PII
//! exposure into one `ThreatVerdict`:
//!
//! 1. pattern score = `1 - e^(-sum of matched weights)`, clamped to [0, 1]
//! 2. confidence = weighted mean of pattern and ML scores; without an ML
//!    score the pattern score carries all the weight. The ML score only
//!    refines content that matched at least one rule; on its own it never
//!    flags anything
//! 3. level = threshold classification of the confidence
//! 4. PII count above the escalation threshold raises the level one step,
//!    to at least `medium`, and lifts the confidence to that level's floor

use crate::config::AnalysisConfig;
use crate::detection::categories::Category;
use crate::logging::structured::LogContext;
use crate::models::findings::{PatternMatch, PiiSummary};
use crate::models::verdict::{ThreatLevel, ThreatVerdict};

/// Saturating weighted sum of matched rule severities.
pub fn pattern_score(matches: &[PatternMatch]) -> f64 {
    let total: f64 = matches.iter().map(|m| m.weight.max(0.0)).sum();
    (1.0 - (-total).exp()).clamp(0.0, 1.0)
}

/// Blend the pattern and ML scores. `ml_score` must already be in [0, 1].
pub fn blend_confidence(pattern: f64, ml_score: Option<f64>, config: &AnalysisConfig) -> f64 {
    match ml_score {
        Some(ml) => {
            let total_weight = config.pattern_weight + config.ml_weight;
            ((config.pattern_weight * pattern + config.ml_weight * ml) / total_weight).clamp(0.0, 1.0)
        }
        None => pattern,
    }
}

/// Distinct categories in first-seen order.
pub fn attack_types(matches: &[PatternMatch]) -> Vec<Category> {
    let mut seen = Vec::new();
    for m in matches {
        if !seen.contains(&m.category) {
            seen.push(m.category);
        }
    }
    seen
}

/// Fuse detector outputs into a verdict.
pub fn fuse(
    matches: &[PatternMatch],
    pii: &PiiSummary,
    ml_score: Option<f64>,
    config: &AnalysisConfig,
    ctx: &LogContext,
) -> ThreatVerdict {
    let pattern = pattern_score(matches);
    let blended_ml = if matches.is_empty() {
        if ml_score.is_some() {
            log::debug!("{} ML_SCORE_IGNORED reason=no_pattern_match", ctx);
        }
        None
    } else {
        ml_score
    };
    let mut confidence = blend_confidence(pattern, blended_ml, config);
    let mut level = ThreatLevel::from_confidence(confidence, &config.thresholds);

    let mut flagged_patterns: Vec<String> = Vec::new();
    for m in matches {
        let description = m.flagged_description();
        if !flagged_patterns.contains(&description) {
            flagged_patterns.push(description);
        }
    }

    let pii_escalated = pii.total_count > config.pii_escalation_threshold;
    if pii_escalated {
        let escalated = level.escalate().max(ThreatLevel::Medium);
        log::info!(
            "{} THREAT_ESCALATED reason=pii pii_count={} threshold={} from={} to={}",
            ctx,
            pii.total_count,
            config.pii_escalation_threshold,
            level,
            escalated
        );
        level = escalated;
        confidence = confidence.max(level.confidence_floor(&config.thresholds));
        flagged_patterns.push(format!(
            "Personal data exposure ({} instances)",
            pii.total_count
        ));
    }

    log::debug!(
        "{} FUSION_COMPLETE pattern_score={:.3} ml_score={:?} confidence={:.3} level={}",
        ctx,
        pattern,
        ml_score,
        confidence,
        level
    );

    ThreatVerdict {
        threat_level: level,
        confidence,
        pattern_score: pattern,
        ml_score,
        attack_types: attack_types(matches),
        flagged_patterns,
        pii_escalated,
        pii: pii.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::findings::{PiiFinding, PiiType};

    fn ctx() -> LogContext {
        LogContext::new("test-req")
    }

    fn hit(category: Category, snippet: &str) -> PatternMatch {
        let spec = category.spec();
        PatternMatch {
            category,
            snippet: snippet.to_string(),
            description: spec.description,
            weight: spec.severity_weight,
        }
    }

    fn emails(count: usize) -> PiiSummary {
        PiiSummary::from_findings(vec![PiiFinding { pii_type: PiiType::Email, count }])
    }

    #[test]
    fn test_no_signal_is_safe() {
        let config = AnalysisConfig::default();
        let verdict = fuse(&[], &PiiSummary::default(), None, &config, &ctx());
        assert_eq!(verdict.threat_level, ThreatLevel::Safe);
        assert!(!verdict.is_flagged());
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.attack_types.is_empty());
    }

    #[test]
    fn test_ml_alone_never_flags() {
        let config = AnalysisConfig::default();
        for ml in [0.0, 0.6, 0.9, 1.0] {
            let verdict = fuse(&[], &PiiSummary::default(), Some(ml), &config, &ctx());
            assert_eq!(verdict.threat_level, ThreatLevel::Safe, "ml={}", ml);
            assert_eq!(verdict.confidence, 0.0);
            assert_eq!(verdict.ml_score, Some(ml));
        }
    }

    #[test]
    fn test_ml_refines_matched_content() {
        let config = AnalysisConfig::default();
        let matches = vec![hit(Category::UrgencyManipulation, "hurry")];
        let pattern_only = fuse(&matches, &PiiSummary::default(), None, &config, &ctx());
        let with_ml = fuse(&matches, &PiiSummary::default(), Some(1.0), &config, &ctx());
        assert_eq!(pattern_only.threat_level, ThreatLevel::Medium);
        assert_eq!(with_ml.threat_level, ThreatLevel::High);
    }

    #[test]
    fn test_pii_escalation_ignores_ml_without_matches() {
        let config = AnalysisConfig::default();
        let verdict = fuse(&[], &emails(3), Some(1.0), &config, &ctx());
        assert_eq!(verdict.threat_level, ThreatLevel::Medium);
    }

    #[test]
    fn test_pattern_score_saturates() {
        assert_eq!(pattern_score(&[]), 0.0);
        let many: Vec<PatternMatch> = (0..50)
            .map(|_| hit(Category::UrgencyManipulation, "hurry"))
            .collect();
        let score = pattern_score(&many);
        assert!(score <= 1.0 && score > 0.99);
    }

    #[test]
    fn test_missing_ml_renormalizes_onto_pattern() {
        let config = AnalysisConfig::default();
        assert_eq!(blend_confidence(0.5, None, &config), 0.5);
        let blended = blend_confidence(0.5, Some(1.0), &config);
        assert!((blended - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_attack_types_first_seen_order() {
        let matches = vec![
            hit(Category::PromotionalLanguage, "free"),
            hit(Category::UrgencyManipulation, "hurry"),
            hit(Category::PromotionalLanguage, "best deal"),
        ];
        assert_eq!(
            attack_types(&matches),
            vec![Category::PromotionalLanguage, Category::UrgencyManipulation]
        );
    }

    #[test]
    fn test_pii_only_escalates_to_medium() {
        let config = AnalysisConfig::default();
        let verdict = fuse(&[], &emails(3), None, &config, &ctx());
        assert_eq!(verdict.threat_level, ThreatLevel::Medium);
        assert!(verdict.pii_escalated);
        assert!(verdict.confidence >= config.thresholds.medium);
    }

    #[test]
    fn test_pii_at_threshold_does_not_escalate() {
        let config = AnalysisConfig::default();
        let verdict = fuse(&[], &emails(2), None, &config, &ctx());
        assert_eq!(verdict.threat_level, ThreatLevel::Safe);
        assert!(!verdict.pii_escalated);
    }

    #[test]
    fn test_pii_raises_high_to_critical() {
        let config = AnalysisConfig::default();
        let matches = vec![
            hit(Category::UrgencyManipulation, "urgent"),
            hit(Category::UrgencyManipulation, "act now"),
            hit(Category::PsychologicalPressure, "you must"),
        ];
        let plain = fuse(&matches, &PiiSummary::default(), None, &config, &ctx());
        assert_eq!(plain.threat_level, ThreatLevel::High);

        let exposed = fuse(&matches, &emails(5), None, &config, &ctx());
        assert_eq!(exposed.threat_level, ThreatLevel::Critical);
    }

    #[test]
    fn test_flagged_patterns_deduplicated() {
        let config = AnalysisConfig::default();
        let matches = vec![
            hit(Category::UrgencyManipulation, "urgent"),
            hit(Category::EmailSpamIndicators, "urgent"),
            hit(Category::UrgencyManipulation, "urgent"),
        ];
        let verdict = fuse(&matches, &PiiSummary::default(), None, &config, &ctx());
        assert_eq!(verdict.flagged_patterns.len(), 2);
    }
}
