//! Single-item analysis.
//!
//! Coordinates the full workflow for one content item:
//! 1. Input validation
//! 2. Pattern matching and PII detection (run side by side)
//! 3. ML signal resolution
//! 4. Score fusion
//! 5. Compliance/marketing scoring
//! 6. Recommendation synthesis
//! 7. Result assembly (request id, timestamp, timing, content hash)

use std::sync::Arc;
use std::time::Instant;

use sha2::{Digest, Sha256};

use crate::config::AnalysisConfig;
use crate::detection::matcher::match_patterns;
use crate::detection::pii::detect_pii;
use crate::error::{AnalysisError, Result};
use crate::models::content::ContentItem;
use crate::models::result::{AnalysisResult, ResultMetadata, DEGRADED_ML_UNAVAILABLE};
use crate::pipeline::context::RequestContext;
use crate::pipeline::extraction::document_kind;
use crate::pipeline::scorer::{resolve_ml_signal, MlScorer};
use crate::scoring::compliance::score_content;
use crate::scoring::fusion::fuse;
use crate::synthesis::recommendation::synthesize;

/// Client id reported when the caller did not identify itself.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// The analysis engine.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent callers.
#[derive(Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    scorer: Option<Arc<dyn MlScorer>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .field("has_scorer", &self.scorer.is_some())
            .finish()
    }
}

impl Analyzer {
    /// Build an analyzer from a validated configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer: None,
        })
    }

    /// Attach an external ML scorer.
    pub fn with_scorer(mut self, scorer: Arc<dyn MlScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse one content item.
    pub fn analyze(&self, item: &ContentItem) -> Result<AnalysisResult> {
        self.analyze_with_context(item, &RequestContext::new())
    }

    /// Analyse one content item under an existing request context.
    pub fn analyze_with_context(
        &self,
        item: &ContentItem,
        rctx: &RequestContext,
    ) -> Result<AnalysisResult> {
        let start = Instant::now();
        let ctx = rctx.log_context();

        self.validate_input(item)?;

        log::debug!(
            "{} ANALYSIS_START content_type={} length={}",
            ctx,
            item.content_type,
            item.text.len()
        );

        let (matches, pii) = rayon::join(
            || match_patterns(&item.text, item.content_type, &ctx),
            || detect_pii(&item.text, &ctx),
        );

        let ml = resolve_ml_signal(item, self.scorer.as_deref(), &ctx);
        let verdict = fuse(&matches, &pii, ml.score, &self.config, &ctx);
        let scores = score_content(&verdict, item.content_type);
        let recommendation = synthesize(&verdict);

        let mut degraded = Vec::new();
        if verdict.ml_score.is_none() {
            degraded.push(DEGRADED_ML_UNAVAILABLE.to_string());
        }

        let metadata = ResultMetadata {
            request_id: rctx.request_id.clone(),
            content_length: item.char_len(),
            content_hash: content_hash(&item.text),
            pattern_score: verdict.pattern_score,
            ml_score: verdict.ml_score,
            ml_latency_ms: ml.latency_ms,
            client_id: item
                .user_id
                .clone()
                .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string()),
            timestamp: rctx.timestamp,
            pii_types_found: verdict.pii.types_found,
            pii_count: verdict.pii.total_count,
            degraded,
            filename: item.filename.clone(),
            document_kind: item.filename.as_deref().map(|f| document_kind(f).to_string()),
        };

        let processing_time = start.elapsed().as_secs_f64() * 1000.0;

        log::info!(
            "{} ANALYSIS_COMPLETE level={} confidence={:.3} attack_types={} compliance={} marketing={} pii={} duration_ms={:.2}",
            ctx,
            verdict.threat_level,
            verdict.confidence,
            verdict.attack_types.len(),
            scores.compliance,
            scores.marketing,
            verdict.pii.total_count,
            processing_time
        );

        Ok(AnalysisResult {
            is_malicious: verdict.is_flagged(),
            threat_level: verdict.threat_level,
            confidence: verdict.confidence,
            pii_detected: verdict.pii.counts_map(),
            attack_types: verdict.attack_types,
            flagged_patterns: verdict.flagged_patterns,
            processing_time,
            recommendation: recommendation.text,
            metadata,
            content_type: item.content_type,
            compliance_score: scores.compliance,
            marketing_score: scores.marketing,
            suggestions: recommendation.suggestions,
        })
    }

    fn validate_input(&self, item: &ContentItem) -> Result<()> {
        if item.text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("content is empty".to_string()));
        }
        let length = item.char_len();
        if length > self.config.max_content_length {
            return Err(AnalysisError::InvalidInput(format!(
                "content length {} exceeds limit {}",
                length, self.config.max_content_length
            )));
        }
        Ok(())
    }
}

/// SHA-256 hex digest of the content, usable as a cache key.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
