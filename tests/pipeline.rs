//! End-to-end tests for the analysis pipeline.

use adshield_core::api::{handle_analyze, AnalyzeRequest, FileAnalysisResponse};
use adshield_core::config::{current_config, install_config, reset_config, AnalysisConfig};
use adshield_core::detection::Category;
use adshield_core::error::AnalysisError;
use adshield_core::models::{AnalysisResult, ContentItem, ContentType, ThreatLevel};
use adshield_core::pipeline::{Analyzer, BatchOptions, PlainTextExtractor, TextExtractor, UploadedFile};

fn analyze(text: &str, content_type: ContentType) -> AnalysisResult {
    Analyzer::default()
        .analyze(&ContentItem::new(text, content_type))
        .unwrap()
}

/// Fields that must not depend on request id, timing or timestamp.
fn assert_same_verdict(a: &AnalysisResult, b: &AnalysisResult) {
    assert_eq!(a.threat_level, b.threat_level);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.is_malicious, b.is_malicious);
    assert_eq!(a.attack_types, b.attack_types);
    assert_eq!(a.flagged_patterns, b.flagged_patterns);
    assert_eq!(a.pii_detected, b.pii_detected);
    assert_eq!(a.compliance_score, b.compliance_score);
    assert_eq!(a.marketing_score, b.marketing_score);
    assert_eq!(a.recommendation, b.recommendation);
    assert_eq!(a.suggestions, b.suggestions);
    assert_eq!(a.metadata.content_hash, b.metadata.content_hash);
}

#[test]
fn test_plain_copy_is_safe() {
    let result = analyze("Our product helps you save time.", ContentType::General);

    assert_eq!(result.threat_level, ThreatLevel::Safe);
    assert!(!result.is_malicious);
    assert!(result.attack_types.is_empty());
    assert!(result.flagged_patterns.is_empty());
    assert!(result.pii_detected.is_empty());
    assert_eq!(result.compliance_score, 100);
    assert_eq!(result.marketing_score, 100);
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_pressure_email_is_high() {
    let result = analyze(
        "URGENT: ACT NOW, this offer expires soon, guaranteed results!",
        ContentType::Email,
    );

    assert_eq!(result.threat_level, ThreatLevel::High);
    assert!((result.confidence - (1.0 - (-2.0f64).exp())).abs() < 1e-9);
    assert!(result.is_malicious);
    assert!(result.attack_types.contains(&Category::UrgencyManipulation));
    assert!(result.attack_types.contains(&Category::UnsubstantiatedClaims));
    assert!(result.attack_types.contains(&Category::EmailSpamIndicators));
    assert!(result.compliance_score < 100);
    assert!(result.marketing_score < 100);
    assert!(!result.suggestions.is_empty());
}

#[test]
fn test_analysis_is_deterministic() {
    let text = "Don't miss this exclusive deal! Tag a friend, only 3 left. Call 555-123-4567.";
    for ct in ContentType::ALL {
        let first = analyze(text, ct);
        let second = analyze(text, ct);
        assert_same_verdict(&first, &second);
        assert_ne!(first.metadata.request_id, second.metadata.request_id);
    }
}

#[test]
fn test_only_safe_content_is_publishable() {
    let safe = analyze("Our product helps you save time.", ContentType::General);
    assert_eq!(safe.ensure_publishable(), Ok(()));

    let risky = analyze("Hurry!", ContentType::General);
    let err = risky.ensure_publishable().unwrap_err();
    assert_eq!(err, AnalysisError::NotPublishable(ThreatLevel::Medium));
    assert_eq!(err.code(), "not_publishable");
}

#[test]
fn test_pii_alone_escalates_to_medium() {
    let result = analyze(
        "Email a@x.com, b@y.com or call 555-123-4567",
        ContentType::General,
    );

    assert!(result.attack_types.is_empty());
    assert_eq!(result.threat_level, ThreatLevel::Medium);
    assert!(result.is_malicious);
    assert_eq!(result.pii_detected.get("email"), Some(&2));
    assert_eq!(result.pii_detected.get("phone"), Some(&1));
    assert_eq!(result.metadata.pii_count, 3);
    assert!(result
        .flagged_patterns
        .iter()
        .any(|p| p.contains("Personal data exposure (3 instances)")));
    assert_eq!(result.compliance_score, 65);
    assert_eq!(result.marketing_score, 96);
}

#[test]
fn test_pii_at_threshold_does_not_escalate() {
    let result = analyze("Email a@x.com or b@y.com", ContentType::General);
    assert_eq!(result.threat_level, ThreatLevel::Safe);
    assert_eq!(result.metadata.pii_count, 2);
}

#[test]
fn test_scores_are_not_one_number() {
    let clean = analyze("Our product helps you save time.", ContentType::General);
    let bait = analyze("Tag a friend who would love this", ContentType::Social);
    let pii = analyze("Email a@x.com, b@y.com or call 555-123-4567", ContentType::General);

    let points = [
        (clean.compliance_score as i32, clean.marketing_score as i32),
        (bait.compliance_score as i32, bait.marketing_score as i32),
        (pii.compliance_score as i32, pii.marketing_score as i32),
    ];
    assert_eq!(points[1], (95, 75));

    // Cross product is zero iff the three points are collinear
    let (x0, y0) = points[0];
    let (x1, y1) = points[1];
    let (x2, y2) = points[2];
    let cross = (x1 - x0) * (y2 - y0) - (y1 - y0) * (x2 - x0);
    assert_ne!(cross, 0);
}

#[test]
fn test_channel_rules_only_apply_to_their_channel() {
    let as_social = analyze("Like and share if you agree", ContentType::Social);
    let as_blog = analyze("Like and share if you agree", ContentType::Blog);

    assert!(as_social.attack_types.contains(&Category::EngagementBaiting));
    assert!(!as_blog.attack_types.contains(&Category::EngagementBaiting));
}

/// Fails on one named file, passes everything else through as UTF-8.
struct FlakyExtractor {
    broken: &'static str,
}

impl TextExtractor for FlakyExtractor {
    fn extract(&self, file: &UploadedFile) -> anyhow::Result<String> {
        if file.filename == self.broken {
            anyhow::bail!("corrupt document");
        }
        Ok(String::from_utf8(file.bytes.clone())?)
    }
}

fn five_uploads() -> Vec<UploadedFile> {
    vec![
        UploadedFile::new("one.txt", "Limited time offer, hurry!"),
        UploadedFile::new("two.txt", "Our product helps you save time."),
        UploadedFile::new("three.txt", "Contact a@x.com, b@y.com or c@z.com"),
        UploadedFile::new("four.pdf", "%PDF-1.7"),
        UploadedFile::new("five.txt", "You won't believe this one trick"),
    ]
}

#[test]
fn test_batch_isolates_failed_upload() {
    let analyzer = Analyzer::default();
    let files = five_uploads();
    let extractor = FlakyExtractor { broken: "four.pdf" };

    for options in [BatchOptions::sequential(), BatchOptions::with_workers(4)] {
        let batch = analyzer.analyze_uploads(&files, ContentType::Document, &extractor, &options);

        assert_eq!(batch.len(), 5);
        assert_eq!(batch.succeeded, 4);
        assert_eq!(batch.failed, 1);

        let err = batch.entries[3].error().unwrap();
        assert_eq!(err.index, 3);
        assert_eq!(err.error, "extraction_failed");
        assert_eq!(err.filename.as_deref(), Some("four.pdf"));
        assert!(err.message.contains("corrupt document"));

        for index in [0, 1, 2, 4] {
            let entry = batch.entries[index].analysis().unwrap();
            let text = String::from_utf8(files[index].bytes.clone()).unwrap();
            let standalone = analyzer
                .analyze(&ContentItem::new(text, ContentType::Document).with_filename(files[index].filename.clone()))
                .unwrap();
            assert_same_verdict(entry, &standalone);
            assert_eq!(entry.metadata.filename, standalone.metadata.filename);
        }
    }
}

#[test]
fn test_batch_with_upstream_errors() {
    let analyzer = Analyzer::default();
    let items = vec![
        Ok(ContentItem::new("Act now!", ContentType::Email)),
        Err(AnalysisError::Extraction {
            filename: "scan.pdf".to_string(),
            reason: "no text layer".to_string(),
        }),
        Ok(ContentItem::new("A calm product update.", ContentType::Blog)),
    ];

    let batch = analyzer.analyze_batch(&items, &BatchOptions::default());
    assert_eq!(batch.len(), 3);
    assert!(batch.entries[0].analysis().is_some());
    assert_eq!(batch.entries[1].error().unwrap().filename.as_deref(), Some("scan.pdf"));
    assert!(batch.entries[2].analysis().is_some());
    assert!(batch.batch_id.starts_with("batch-"));
}

#[test]
fn test_batch_max_threat_level() {
    let analyzer = Analyzer::default();

    let calm = vec![
        ContentItem::new("Our product helps you save time.", ContentType::General),
        ContentItem::new("Quarterly update for the team.", ContentType::Blog),
    ];
    let batch = analyzer.analyze_items(&calm, &BatchOptions::default());
    assert_eq!(batch.max_threat_level(), ThreatLevel::Safe);

    let mixed = vec![
        ContentItem::new("Our product helps you save time.", ContentType::General),
        ContentItem::new("", ContentType::General),
        ContentItem::new(
            "URGENT: ACT NOW, this offer expires soon, guaranteed results!",
            ContentType::Email,
        ),
        ContentItem::new("Hurry!", ContentType::General),
    ];
    let batch = analyzer.analyze_items(&mixed, &BatchOptions::default());
    assert_eq!(batch.failed, 1);
    assert_eq!(batch.max_threat_level(), ThreatLevel::High);

    let nothing = analyzer.analyze_items(&[], &BatchOptions::default());
    assert_eq!(nothing.max_threat_level(), ThreatLevel::Safe);
}

#[test]
fn test_upload_response_shapes() {
    let analyzer = Analyzer::default();

    let single = analyzer.analyze_uploads(
        &[UploadedFile::new("copy.md", "Free shipping on all orders")],
        ContentType::Ad,
        &PlainTextExtractor,
        &BatchOptions::default(),
    );
    let json = serde_json::to_value(FileAnalysisResponse::from_batch(single)).unwrap();
    assert!(json.is_object());
    assert_eq!(json["metadata"]["filename"], "copy.md");

    let multi = analyzer.analyze_uploads(
        &five_uploads(),
        ContentType::Document,
        &PlainTextExtractor,
        &BatchOptions::default(),
    );
    let json = serde_json::to_value(FileAnalysisResponse::from_batch(multi)).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert!(entries[0].get("analysis").is_some());
    assert_eq!(entries[3]["error"]["error"], "extraction_failed");
}

#[test]
fn test_request_contract() {
    let analyzer = Analyzer::default();

    let request = AnalyzeRequest::from_json(r#"{"prompt": "Hurry, last chance!", "content_type": "social"}"#).unwrap();
    let response = handle_analyze(&analyzer, &request).unwrap();
    assert!(response.success);
    assert_eq!(response.analysis.content_type, ContentType::Social);
    assert_eq!(response.request_id, response.analysis.metadata.request_id);

    let empty = AnalyzeRequest::from_json(r#"{"content": "  "}"#).unwrap();
    let err = handle_analyze(&analyzer, &empty).unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.body.error, "invalid_input");
}

#[test]
fn test_installed_config_drives_new_analyzers() {
    let strict = AnalysisConfig::from_json_str(r#"{"pii_escalation_threshold": 0}"#).unwrap();
    install_config(strict.clone()).unwrap();
    assert_eq!(current_config(), strict);

    let analyzer = Analyzer::new(current_config()).unwrap();
    let result = analyzer
        .analyze(&ContentItem::new("Reach me at a@x.com", ContentType::General))
        .unwrap();
    assert_eq!(result.threat_level, ThreatLevel::Medium);

    let rejected = AnalysisConfig {
        pattern_weight: -1.0,
        ..AnalysisConfig::default()
    };
    assert!(install_config(rejected).is_err());
    assert_eq!(current_config(), strict);

    reset_config();
    assert_eq!(current_config(), AnalysisConfig::default());
}
