//! Engine Tuning Configuration
//!
//! Every tolerance, gate, and weight in the pipeline is tunable here,
//! replacing hardcoded values with operator-adjustable ones. Built-in
//! defaults match the documented constants in [`crate::types::thresholds`].
//!
//! The engine itself performs no I/O: construct an [`EngineConfig`] in code,
//! or use the TOML helpers (`from_toml_str`, `from_toml_path`) when the
//! caller wants file-based tuning. Unknown TOML keys are rejected so typos
//! do not silently fall back to defaults.
//!
//! ```ignore
//! let config = EngineConfig::from_toml_str(r#"
//!     candidate_distance_tolerance_ft = 300.0
//!
//!     [weights]
//!     distance = 0.5
//!     dimensional = 0.3
//!     clock = 0.1
//!     feature_type = 0.1
//! "#)?;
//! let engine = Engine::new(config);
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::types::thresholds::{alignment_defaults, growth_defaults, matching_defaults};

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Weights of the four similarity components. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimilarityWeights {
    pub distance: f64,
    pub dimensional: f64,
    pub clock: f64,
    pub feature_type: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            distance: matching_defaults::WEIGHT_DISTANCE,
            dimensional: matching_defaults::WEIGHT_DIMENSIONAL,
            clock: matching_defaults::WEIGHT_CLOCK,
            feature_type: matching_defaults::WEIGHT_FEATURE_TYPE,
        }
    }
}

impl SimilarityWeights {
    pub fn sum(&self) -> f64 {
        self.distance + self.dimensional + self.clock + self.feature_type
    }
}

/// All tunable parameters of the alignment and matching engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum |Δdistance| for a reference pair candidate (ft)
    pub reference_match_tolerance_ft: f64,
    /// Score penalty per joint of joint-number mismatch (ft-equivalent)
    pub joint_mismatch_penalty_ft: f64,
    /// Span-ratio deviation beyond which a zone is flagged as a replacement
    pub replacement_factor_tolerance: f64,
    /// Maximum gap between consecutive unmatched references in one section (ft)
    pub replacement_cluster_gap_ft: f64,
    /// Candidate gate on corrected-distance separation (ft)
    pub candidate_distance_tolerance_ft: f64,
    /// Candidate gate on similarity total
    pub min_candidate_similarity: f64,
    /// Acceptance threshold for an assigned pair
    pub min_match_similarity: f64,
    /// Confidence at or above which a chain is `matched`
    pub confident_match_threshold: f64,
    /// e-folding length of the distance similarity (ft)
    pub distance_decay_ft: f64,
    /// Depth at which a defect is critical (% of wall thickness)
    pub critical_depth_percent: f64,
    /// Target sample count for the down-sampled drift profile
    pub drift_profile_target_points: usize,
    /// Similarity component weights
    pub weights: SimilarityWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_match_tolerance_ft: alignment_defaults::REFERENCE_MATCH_TOLERANCE_FT,
            joint_mismatch_penalty_ft: alignment_defaults::JOINT_MISMATCH_PENALTY_FT,
            replacement_factor_tolerance: alignment_defaults::REPLACEMENT_FACTOR_TOLERANCE,
            replacement_cluster_gap_ft: alignment_defaults::REPLACEMENT_CLUSTER_GAP_FT,
            candidate_distance_tolerance_ft: matching_defaults::CANDIDATE_DISTANCE_TOLERANCE_FT,
            min_candidate_similarity: matching_defaults::MIN_CANDIDATE_SIMILARITY,
            min_match_similarity: matching_defaults::MIN_MATCH_SIMILARITY,
            confident_match_threshold: matching_defaults::CONFIDENT_MATCH_THRESHOLD,
            distance_decay_ft: matching_defaults::DISTANCE_DECAY_FT,
            critical_depth_percent: growth_defaults::CRITICAL_DEPTH_PERCENT,
            drift_profile_target_points: alignment_defaults::DRIFT_PROFILE_TARGET_POINTS,
            weights: SimilarityWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check internal consistency. Called automatically by the TOML
    /// constructors; call it directly when building a config in code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("reference_match_tolerance_ft", self.reference_match_tolerance_ft),
            ("joint_mismatch_penalty_ft", self.joint_mismatch_penalty_ft),
            ("replacement_cluster_gap_ft", self.replacement_cluster_gap_ft),
            ("candidate_distance_tolerance_ft", self.candidate_distance_tolerance_ft),
            ("distance_decay_ft", self.distance_decay_ft),
            ("critical_depth_percent", self.critical_depth_percent),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.replacement_factor_tolerance) {
            return Err(ConfigError::Invalid(format!(
                "replacement_factor_tolerance must lie in [0, 1], got {}",
                self.replacement_factor_tolerance
            )));
        }

        let ordered = self.min_candidate_similarity <= self.min_match_similarity
            && self.min_match_similarity <= self.confident_match_threshold
            && self.confident_match_threshold <= 1.0
            && self.min_candidate_similarity >= 0.0;
        if !ordered {
            return Err(ConfigError::Invalid(format!(
                "similarity gates must satisfy 0 ≤ candidate ({}) ≤ match ({}) ≤ confident ({}) ≤ 1",
                self.min_candidate_similarity,
                self.min_match_similarity,
                self.confident_match_threshold
            )));
        }

        let w = &self.weights;
        for (name, value) in [
            ("distance", w.distance),
            ("dimensional", w.dimensional),
            ("clock", w.clock),
            ("feature_type", w.feature_type),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "weights.{name} must be non-negative, got {value}"
                )));
            }
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "similarity weights must sum to 1, got {}",
                w.sum()
            )));
        }

        if self.drift_profile_target_points == 0 {
            return Err(ConfigError::Invalid(
                "drift_profile_target_points must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
