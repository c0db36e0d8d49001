//! Analysis tuning surface.
//!
//! Threat-level thresholds and the PII escalation rule are the most
//! safety-critical knobs in the engine, so every default lives here and
//! nowhere else.

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Weight of the pattern score in the blended confidence.
pub const DEFAULT_PATTERN_WEIGHT: f64 = 0.6;
/// Weight of the external ML score in the blended confidence.
pub const DEFAULT_ML_WEIGHT: f64 = 0.4;

/// Blended confidence at or above which content is `low`.
pub const LOW_THRESHOLD: f64 = 0.10;
/// Blended confidence at or above which content is `medium`.
pub const MEDIUM_THRESHOLD: f64 = 0.30;
/// Blended confidence at or above which content is `high`.
pub const HIGH_THRESHOLD: f64 = 0.55;
/// Blended confidence at or above which content is `critical`.
pub const CRITICAL_THRESHOLD: f64 = 0.95;

/// PII instance count above which the threat level is escalated.
pub const PII_ESCALATION_THRESHOLD: usize = 2;

/// Largest accepted content, in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Default worker count for batch analysis.
pub const DEFAULT_BATCH_WORKERS: usize = 4;

/// Ordered confidence thresholds for each non-safe threat level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for ThreatThresholds {
    fn default() -> Self {
        Self {
            low: LOW_THRESHOLD,
            medium: MEDIUM_THRESHOLD,
            high: HIGH_THRESHOLD,
            critical: CRITICAL_THRESHOLD,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub pattern_weight: f64,
    pub ml_weight: f64,
    pub thresholds: ThreatThresholds,
    pub pii_escalation_threshold: usize,
    pub max_content_length: usize,
    pub batch_workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern_weight: DEFAULT_PATTERN_WEIGHT,
            ml_weight: DEFAULT_ML_WEIGHT,
            thresholds: ThreatThresholds::default(),
            pii_escalation_threshold: PII_ESCALATION_THRESHOLD,
            max_content_length: MAX_CONTENT_LENGTH,
            batch_workers: DEFAULT_BATCH_WORKERS,
        }
    }
}

impl AnalysisConfig {
    /// Parse a (possibly partial) JSON document; missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)
            .map_err(|e| AnalysisError::Config(format!("JSON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break the verdict ordering.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let ordered = [t.low, t.medium, t.high, t.critical];

        if ordered.iter().any(|v| !v.is_finite() || *v <= 0.0 || *v > 1.0) {
            return Err(AnalysisError::Config(format!(
                "thresholds must lie in (0, 1], got {:?}",
                ordered
            )));
        }
        if ordered.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::Config(format!(
                "thresholds must be strictly ascending, got {:?}",
                ordered
            )));
        }
        if !self.pattern_weight.is_finite() || !self.ml_weight.is_finite() {
            return Err(AnalysisError::Config("weights must be finite".to_string()));
        }
        if self.pattern_weight <= 0.0 || self.ml_weight < 0.0 {
            return Err(AnalysisError::Config(format!(
                "pattern_weight must be > 0 and ml_weight >= 0, got {} / {}",
                self.pattern_weight, self.ml_weight
            )));
        }
        if self.pattern_weight < self.ml_weight {
            return Err(AnalysisError::Config(format!(
                "pattern_weight ({}) must be at least ml_weight ({})",
                self.pattern_weight, self.ml_weight
            )));
        }
        if self.max_content_length == 0 {
            return Err(AnalysisError::Config(
                "max_content_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// Process-wide config slot for the binding layer
lazy_static! {
    static ref ACTIVE_CONFIG: RwLock<AnalysisConfig> = RwLock::new(AnalysisConfig::default());
}

/// Snapshot of the installed configuration.
pub fn current_config() -> AnalysisConfig {
    ACTIVE_CONFIG.read().clone()
}

/// Validate and install a configuration for subsequent requests.
pub fn install_config(config: AnalysisConfig) -> Result<()> {
    config.validate()?;
    log::info!(
        "CONFIG_INSTALLED thresholds={:?} pii_escalation_threshold={} workers={}",
        config.thresholds,
        config.pii_escalation_threshold,
        config.batch_workers
    );
    *ACTIVE_CONFIG.write() = config;
    Ok(())
}

/// Restore the default configuration.
pub fn reset_config() {
    *ACTIVE_CONFIG.write() = AnalysisConfig::default();
    log::info!("CONFIG_RESET");
}
