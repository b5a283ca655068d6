//! Canonical anomaly records and the raw rows they are built from

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical classification for every feature an ILI tool can list.
///
/// Girth welds, valves, and fittings double as reference points for
/// coordinate alignment; everything else is a candidate defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    ExternalMetalLoss,
    InternalMetalLoss,
    MetalLoss,
    Dent,
    Crack,
    Gouge,
    Lamination,
    ManufacturingDefect,
    GirthWeld,
    SeamWeld,
    Valve,
    Fitting,
    Casing,
    #[default]
    Unknown,
}

impl FeatureType {
    /// Whether features of this type anchor the coordinate alignment.
    pub fn is_reference(self) -> bool {
        matches!(self, Self::GirthWeld | Self::Valve | Self::Fitting)
    }
}

/// Clock position as vendors report it: `"4:30"`, `4.5`, or `135.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClockField {
    Number(f64),
    Text(String),
}

/// One canonical-named row handed over by the ingest collaborator.
///
/// Column names have already been resolved from vendor headers; values are
/// still whatever the spreadsheet held, so everything is optional here and
/// the normalizer supplies defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub feature_id: Option<String>,
    /// Reported log distance (ft, or m; the cleaner auto-detects)
    #[serde(default)]
    pub distance: Option<f64>,
    /// Odometer wheel count (same unit as `distance`)
    #[serde(default)]
    pub odometer: Option<f64>,
    #[serde(default)]
    pub joint_number: Option<i64>,
    #[serde(default)]
    pub clock_position: Option<ClockField>,
    #[serde(default)]
    pub feature_type: Option<String>,
    #[serde(default)]
    pub depth_percent: Option<f64>,
    /// Axial length (in or mm)
    #[serde(default)]
    pub length: Option<f64>,
    /// Circumferential width (in or mm)
    #[serde(default)]
    pub width: Option<f64>,
    /// Nominal wall thickness (in or mm)
    #[serde(default)]
    pub wall_thickness: Option<f64>,
    #[serde(default)]
    pub weld_type: Option<String>,
    #[serde(default)]
    pub relative_position: Option<String>,
    /// Vendor columns the engine does not read, preserved verbatim.
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

/// Stable identity of an anomaly: run plus original row position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AnomalyId {
    pub run_index: usize,
    pub row_index: usize,
}

impl AnomalyId {
    pub fn new(run_index: usize, row_index: usize) -> Self {
        Self {
            run_index,
            row_index,
        }
    }
}

/// A single observed feature in one inspection run.
///
/// Created by the normalizer from one raw row. `corrected_distance` is
/// assigned exactly once by the distance corrector; `cleaning_flags` are
/// appended by cleaner passes; everything else is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: AnomalyId,
    /// Vendor-assigned feature id, when the sheet carries one
    pub feature_id: Option<String>,
    /// Distance reported by the tool log (ft)
    pub raw_distance: f64,
    /// Odometer wheel count (ft); drifts against true distance
    pub odometer: f64,
    /// Distance in the reference run's coordinate system (ft)
    pub corrected_distance: f64,
    /// Joint number; 0 = unknown
    pub joint_number: u32,
    /// Circumferential position in degrees, [0, 360)
    pub clock_degrees: f64,
    pub feature_type: FeatureType,
    /// Metal-loss depth as a percentage of wall thickness, [0, 100]
    pub depth_percent: f64,
    /// Axial length (in)
    pub length: f64,
    /// Circumferential width (in)
    pub width: f64,
    /// Nominal wall thickness (in)
    pub wall_thickness: f64,
    /// Audit trail appended by cleaning passes
    pub cleaning_flags: Vec<String>,
    pub has_missing_data: bool,
    /// Vendor columns preserved verbatim from the raw row
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Anomaly {
    /// Whether this feature anchors the coordinate alignment.
    pub fn is_reference_point(&self) -> bool {
        self.feature_type.is_reference()
    }
}
