//! Reference points, matched pairs, alignment zones, and drift series

use serde::{Deserialize, Serialize};

use super::{AnomalyId, FeatureType};

/// Projection of a reference-type anomaly (girth weld, valve, fitting) used
/// to anchor coordinate alignment between two runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub id: AnomalyId,
    /// Reported log distance (ft)
    pub distance: f64,
    /// Odometer wheel count (ft)
    pub odometer: f64,
    /// Joint number; 0 = unknown
    pub joint_number: u32,
    pub feature_type: FeatureType,
    pub run_index: usize,
}

/// A pair of reference points matched between two runs.
///
/// `ref_a` belongs to the earlier (canonical) run, `ref_b` to the later run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedReference {
    pub ref_a: ReferencePoint,
    pub ref_b: ReferencePoint,
    /// `ref_b.distance − ref_a.distance` (ft)
    pub distance_offset: f64,
    /// Change in (distance − odometer) between the two observations (ft)
    pub odometer_drift: f64,
}

/// An interval of the later run governed by a single affine distance remap.
///
/// Bounded by two consecutive matched reference pairs. `is_pipe_replacement`
/// is set when the raw/canonical span ratio deviates from 1 by more than the
/// configured tolerance, indicating a cut-out or added pipe section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentZone {
    /// Index of the later run this zone remaps
    pub run_index: usize,
    /// Zone start in the later run's raw coordinate (ft)
    pub start_raw: f64,
    /// Zone end in the later run's raw coordinate (ft)
    pub end_raw: f64,
    /// Zone start in the reference run's coordinate (ft)
    pub start_canonical: f64,
    /// Zone end in the reference run's coordinate (ft)
    pub end_canonical: f64,
    /// Raw span divided by canonical span; 1 when the spans agree
    pub correction_factor: f64,
    pub is_pipe_replacement: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// References present in the earlier run with no later counterpart
    Removed,
    /// References present in the later run with no earlier counterpart
    Added,
}

/// A span of consecutive unmatched reference points suggesting that a pipe
/// section was cut out or spooled in between inspections. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacedSection {
    /// Run the unmatched references belong to
    pub run_index: usize,
    pub kind: SectionKind,
    /// Distance of the first unmatched reference (ft)
    pub start_distance: f64,
    /// Distance of the last unmatched reference (ft)
    pub end_distance: f64,
    /// Number of unmatched references in the span
    pub reference_count: usize,
}

/// One sample of odometer drift along a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftPoint {
    /// Reported log distance (ft)
    pub distance: f64,
    /// Odometer wheel count (ft)
    pub odometer: f64,
    /// `distance − odometer` (ft)
    pub drift: f64,
    /// Present on reference-point samples, e.g. `"Ref 3 (Jt 41)"`
    pub label: Option<String>,
}

/// Summary statistics for one run's drift curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftSummary {
    pub max_drift: f64,
    pub min_drift: f64,
    pub mean_drift: f64,
    /// Drift at the last sample minus drift at the first (ft)
    pub total_accumulated: f64,
    /// Accumulated drift per 1,000 ft of surveyed distance
    pub drift_rate_per_1000ft: f64,
}

/// Per-run drift diagnostics: reference-point series, a down-sampled
/// full-run profile, and summary statistics. All drift is measured on
/// pre-correction distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDrift {
    pub run_index: usize,
    pub year: i32,
    pub reference_points: Vec<DriftPoint>,
    pub profile: Vec<DriftPoint>,
    pub summary: DriftSummary,
}
