//! External ML signal.
//!
//! The engine does not compute an ML score. It consumes one, either supplied
//! on the content item or fetched through an `MlScorer`. Any failure degrades
//! to pattern-only fusion.

use std::time::Instant;

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::models::content::{ContentItem, ContentType};

/// Source of the external ML risk score in [0, 1].
pub trait MlScorer: Send + Sync {
    fn score(&self, text: &str, content_type: ContentType) -> Result<f64>;
}

impl<F> MlScorer for F
where
    F: Fn(&str, ContentType) -> Result<f64> + Send + Sync,
{
    fn score(&self, text: &str, content_type: ContentType) -> Result<f64> {
        self(text, content_type)
    }
}

/// Resolved ML signal for one request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MlSignal {
    pub score: Option<f64>,
    /// Time spent in the scorer call, when one was made.
    pub latency_ms: Option<f64>,
}

fn sanitize_score(raw: f64, ctx: &LogContext) -> Option<f64> {
    if !raw.is_finite() {
        log::warn!("{} ML_SCORE_DEGRADED reason=non_finite value={}", ctx, raw);
        return None;
    }
    if !(0.0..=1.0).contains(&raw) {
        log::warn!("{} ML_SCORE_CLAMPED value={}", ctx, raw);
    }
    Some(raw.clamp(0.0, 1.0))
}

/// Resolve the ML signal: a score on the item wins, then the scorer.
pub fn resolve_ml_signal(
    item: &ContentItem,
    scorer: Option<&dyn MlScorer>,
    ctx: &LogContext,
) -> MlSignal {
    if let Some(raw) = item.ml_score {
        return MlSignal {
            score: sanitize_score(raw, ctx),
            latency_ms: None,
        };
    }

    let Some(scorer) = scorer else {
        log::debug!("{} ML_SCORE_DEGRADED reason=no_scorer", ctx);
        return MlSignal::default();
    };

    let start = Instant::now();
    let outcome = scorer.score(&item.text, item.content_type);
    let latency_ms = Some(start.elapsed().as_secs_f64() * 1000.0);

    match outcome {
        Ok(raw) => MlSignal {
            score: sanitize_score(raw, ctx),
            latency_ms,
        },
        Err(e) => {
            log::warn!("{} ML_SCORE_DEGRADED reason=scorer_error error={}", ctx, e);
            MlSignal {
                score: None,
                latency_ms,
            }
        }
    }
}
