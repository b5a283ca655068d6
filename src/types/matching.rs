//! Similarity scores, matched pairs, chains, growth, and priority bands

use serde::{Deserialize, Serialize};

use super::{AnomalyId, FeatureType};

/// Per-component anomaly-to-anomaly similarity. Every component and the
/// weighted total lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Similarity {
    /// Exponential decay on corrected-distance separation
    pub distance: f64,
    /// Cosine similarity of (depth %, length, width)
    pub dimensional: f64,
    /// Circular closeness of clock positions
    pub clock: f64,
    /// Feature-type affinity: 1 equal, 0.5 compatible, 0 otherwise
    pub feature_type: f64,
    /// Weighted sum of the four components
    pub total: f64,
}

/// Lifecycle status of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Confidently tracked across runs (confidence ≥ 0.70)
    Matched,
    /// Tracked but low-confidence (0.40 ≤ confidence < 0.70)
    Uncertain,
    /// First observed in the later run of its origin pair
    New,
    /// Observed in a run but absent from the following run
    Missing,
}

/// An accepted one-to-one anomaly pair between two consecutive runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub a: AnomalyId,
    pub b: AnomalyId,
    pub similarity: Similarity,
    /// Equal to `similarity.total`
    pub confidence: f64,
    /// Residual longitudinal offset after alignment (ft):
    /// `b.corrected_distance − a.corrected_distance`
    pub station_delta_ft: f64,
}

/// Outcome of bipartite matching for one consecutive run pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairMatchResult {
    pub run_a: usize,
    pub run_b: usize,
    pub pairs: Vec<MatchedPair>,
    /// Run-A anomalies with no accepted partner
    pub missing: Vec<AnomalyId>,
    /// Run-B anomalies with no accepted partner
    pub new_features: Vec<AnomalyId>,
}

/// Growth rates fitted across a chain's time series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthRates {
    /// Depth growth (% of wall per year)
    pub depth_percent_per_year: f64,
    /// Length growth (in per year)
    pub length_in_per_year: f64,
    /// Width growth (in per year)
    pub width_in_per_year: f64,
    /// Coefficient of determination of the depth fit
    pub r_squared: f64,
    /// Two-tailed Student-t significance of the depth fit; None for n < 3
    pub p_value: Option<f64>,
    /// Projected years until depth reaches the critical threshold;
    /// None when depth is not growing
    pub time_to_critical_years: Option<f64>,
}

/// Regulatory response band, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    Immediate,
    SixtyDay,
    OneEightyDay,
    Scheduled,
    #[default]
    Monitor,
}

impl PriorityBand {
    /// Display label used in dig-sheet exports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Immediate => "IMMEDIATE",
            Self::SixtyDay => "60-DAY",
            Self::OneEightyDay => "180-DAY",
            Self::Scheduled => "SCHEDULED",
            Self::Monitor => "MONITOR",
        }
    }

    /// Regulatory basis for the band.
    pub fn citation(self) -> &'static str {
        match self {
            Self::Immediate => "49 CFR 192.485",
            Self::SixtyDay => "ASME B31.8S Table 4 C2",
            Self::OneEightyDay => "ASME B31.8S Table 4 C3",
            Self::Scheduled => "49 CFR 192.485(c)",
            Self::Monitor => "49 CFR 192.485(d)",
        }
    }
}

/// A single physical feature tracked across 1..K runs.
///
/// Members are ordered by run. `member_indices` index into
/// `EngineResult::aligned_anomalies` so the result stays trivially
/// serializable with no shared pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyChain {
    /// Indices into the flat aligned-anomaly list, one per member
    pub member_indices: Vec<usize>,
    /// Stable ids of the members, parallel to `member_indices`
    pub members: Vec<AnomalyId>,
    /// Runs this chain spans, ascending
    pub run_indices: Vec<usize>,
    /// Confidence of the first pair forming the chain; 0 for singletons
    pub confidence: f64,
    pub status: MatchStatus,
    /// Similarity breakdown of the last pair; None for singletons
    pub similarity: Option<Similarity>,
    /// Residual offset of the last pair (ft); 0 for singletons
    pub station_delta_ft: f64,
    pub growth: GrowthRates,
    pub priority: PriorityBand,
    /// Position of the latest observation (ft, reference-run frame)
    pub position: f64,
    /// Clock position of the latest observation (degrees)
    pub clock_degrees: f64,
    /// Feature type of the latest observation
    pub feature_type: FeatureType,
    /// Depth of the latest observation (% of wall)
    pub latest_depth_percent: f64,
}
