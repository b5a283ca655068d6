//! Default tolerances and weights for the alignment and matching engine
//!
//! These are the built-in defaults behind `EngineConfig::default()`; callers
//! tune them through TOML config rather than editing constants.

/// Coordinate-alignment tolerances
pub mod alignment_defaults {
    /// Maximum |Δdistance| for a reference pair candidate (ft)
    pub const REFERENCE_MATCH_TOLERANCE_FT: f64 = 500.0;
    /// Score penalty per joint of joint-number mismatch (ft-equivalent)
    pub const JOINT_MISMATCH_PENALTY_FT: f64 = 100.0;
    /// Span-ratio deviation beyond which a zone is flagged as a replacement
    pub const REPLACEMENT_FACTOR_TOLERANCE: f64 = 0.2;
    /// Maximum gap between consecutive unmatched references in one section (ft)
    pub const REPLACEMENT_CLUSTER_GAP_FT: f64 = 200.0;
    /// Minimum consecutive unmatched references to report a section
    pub const REPLACEMENT_MIN_RUN: usize = 2;
    /// Target sample count for the down-sampled drift profile
    pub const DRIFT_PROFILE_TARGET_POINTS: usize = 200;
}

/// Anomaly-matching gates and similarity weights
pub mod matching_defaults {
    /// Candidate gate on corrected-distance separation (ft)
    pub const CANDIDATE_DISTANCE_TOLERANCE_FT: f64 = 200.0;
    /// Candidate gate on similarity total
    pub const MIN_CANDIDATE_SIMILARITY: f64 = 0.20;
    /// Acceptance threshold for an assigned pair
    pub const MIN_MATCH_SIMILARITY: f64 = 0.40;
    /// Confidence at or above which a chain is `matched` rather than `uncertain`
    pub const CONFIDENT_MATCH_THRESHOLD: f64 = 0.70;
    /// Cost-matrix sentinel for non-candidate cells
    pub const NON_CANDIDATE_COST: f64 = 1000.0;
    /// e-folding length of the distance similarity (ft)
    pub const DISTANCE_DECAY_FT: f64 = 50.0;

    /// Weight of corrected-distance proximity (40%)
    pub const WEIGHT_DISTANCE: f64 = 0.40;
    /// Weight of (depth, length, width) cosine similarity (30%)
    pub const WEIGHT_DIMENSIONAL: f64 = 0.30;
    /// Weight of circumferential clock closeness (20%)
    pub const WEIGHT_CLOCK: f64 = 0.20;
    /// Weight of feature-type affinity (10%)
    pub const WEIGHT_FEATURE_TYPE: f64 = 0.10;
}

/// Growth and time-to-critical parameters
pub mod growth_defaults {
    /// Depth at which a defect is critical (% of wall thickness)
    pub const CRITICAL_DEPTH_PERCENT: f64 = 80.0;
}

/// Priority-band rule thresholds (first matching band wins)
pub mod priority_defaults {
    /// IMMEDIATE: depth at or past critical (%)
    pub const IMMEDIATE_DEPTH_PERCENT: f64 = 80.0;
    /// IMMEDIATE: time-to-critical at or under (years)
    pub const IMMEDIATE_TTC_YEARS: f64 = 1.0;
    /// IMMEDIATE: depth growth at or over (%/yr)
    pub const IMMEDIATE_GROWTH: f64 = 8.0;

    /// 60-DAY: depth at or over (%)
    pub const SIXTY_DAY_DEPTH_PERCENT: f64 = 60.0;
    /// 60-DAY: depth growth at or over (%/yr)
    pub const SIXTY_DAY_GROWTH: f64 = 5.0;
    /// 60-DAY: time-to-critical at or under (years)
    pub const SIXTY_DAY_TTC_YEARS: f64 = 3.0;

    /// 180-DAY: depth at or over (%)
    pub const ONE_EIGHTY_DAY_DEPTH_PERCENT: f64 = 40.0;
    /// 180-DAY: depth growth at or over (%/yr)
    pub const ONE_EIGHTY_DAY_GROWTH: f64 = 2.0;

    /// SCHEDULED: depth at or over (%)
    pub const SCHEDULED_DEPTH_PERCENT: f64 = 20.0;
    /// SCHEDULED: depth growth at or over (%/yr)
    pub const SCHEDULED_GROWTH: f64 = 0.5;
}
