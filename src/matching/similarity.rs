//! Weighted Anomaly Similarity
//!
//! Four components, each in [0, 1]:
//! - distance: exponential decay on corrected-distance separation
//! - dimensional: cosine similarity of (depth %, length, width)
//! - clock: circular closeness of circumferential positions
//! - feature type: 1 for equal types, 0.5 for compatible families, else 0
//!
//! The weighted total drives both candidate filtering and acceptance in the
//! bipartite matcher.

use crate::config::EngineConfig;
use crate::types::{Anomaly, FeatureType, Similarity};

/// Magnitudes below this make the dimensional cosine meaningless.
const DIMENSION_EPSILON: f64 = 1e-10;

/// Score two non-reference anomalies against each other.
pub fn score(a: &Anomaly, b: &Anomaly, config: &EngineConfig) -> Similarity {
    let distance = distance_similarity(
        a.corrected_distance,
        b.corrected_distance,
        config.distance_decay_ft,
    );
    let dimensional = dimensional_similarity(a, b);
    let clock = clock_similarity(a.clock_degrees, b.clock_degrees);
    let feature_type = type_affinity(a.feature_type, b.feature_type);

    let w = &config.weights;
    let total = w.distance * distance
        + w.dimensional * dimensional
        + w.clock * clock
        + w.feature_type * feature_type;

    Similarity {
        distance,
        dimensional,
        clock,
        feature_type,
        total,
    }
}

fn distance_similarity(a: f64, b: f64, decay_ft: f64) -> f64 {
    (-(a - b).abs() / decay_ft).exp()
}

/// Cosine similarity of the (depth, length, width) vectors, clamped to ≥ 0.
/// Zero when either vector is effectively empty.
fn dimensional_similarity(a: &Anomaly, b: &Anomaly) -> f64 {
    let va = [a.depth_percent, a.length, a.width];
    let vb = [b.depth_percent, b.length, b.width];
    let norm_a = va.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = vb.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a < DIMENSION_EPSILON || norm_b < DIMENSION_EPSILON {
        return 0.0;
    }
    let dot: f64 = va.iter().zip(vb.iter()).map(|(x, y)| x * y).sum();
    (dot / (norm_a * norm_b)).max(0.0)
}

/// Circular closeness: 1 at the same angle, 0 diametrically opposite.
fn clock_similarity(a: f64, b: f64) -> f64 {
    let gap = (a - b).abs();
    let wrapped = gap.min(360.0 - gap);
    1.0 - wrapped / 180.0
}

/// Feature-type affinity. Compatible families score half: generic metal
/// loss against its internal/external refinements, cracks against gouges,
/// and the two weld kinds against each other.
fn type_affinity(a: FeatureType, b: FeatureType) -> f64 {
    use FeatureType::*;
    if a == b {
        return 1.0;
    }
    match (a, b) {
        (ExternalMetalLoss, MetalLoss)
        | (MetalLoss, ExternalMetalLoss)
        | (InternalMetalLoss, MetalLoss)
        | (MetalLoss, InternalMetalLoss)
        | (ExternalMetalLoss, InternalMetalLoss)
        | (InternalMetalLoss, ExternalMetalLoss)
        | (Crack, Gouge)
        | (Gouge, Crack)
        | (GirthWeld, SeamWeld)
        | (SeamWeld, GirthWeld) => 0.5,
        _ => 0.0,
    }
}
