//! Odometer Drift Reporting
//!
//! Wheel slip makes the odometer lag the reported log distance, and the lag
//! grows along the line. Two series per run feed the diagnostics: the drift
//! at every reference point (labelled for display) and a down-sampled
//! full-run profile. All drift is measured on pre-correction distances so
//! the curves describe the tool, not the alignment.

use crate::types::{Anomaly, DriftPoint, DriftSummary, ReferencePoint, RunDrift};

/// Build one run's drift diagnostics.
///
/// `target_points` bounds the profile length: the stride is
/// `max(1, n / target_points)` over the distance-sorted anomaly list.
pub fn run_drift(
    run_index: usize,
    year: i32,
    anomalies: &[Anomaly],
    references: &[ReferencePoint],
    target_points: usize,
) -> RunDrift {
    let reference_points: Vec<DriftPoint> = references
        .iter()
        .enumerate()
        .map(|(i, reference)| DriftPoint {
            distance: reference.distance,
            odometer: reference.odometer,
            drift: reference.distance - reference.odometer,
            label: Some(format!("Ref {} (Jt {})", i + 1, reference.joint_number)),
        })
        .collect();

    let stride = (anomalies.len() / target_points.max(1)).max(1);
    let profile: Vec<DriftPoint> = anomalies
        .iter()
        .step_by(stride)
        .map(|anomaly| DriftPoint {
            distance: anomaly.raw_distance,
            odometer: anomaly.odometer,
            drift: anomaly.raw_distance - anomaly.odometer,
            label: None,
        })
        .collect();

    RunDrift {
        run_index,
        year,
        reference_points,
        profile,
        summary: summarize(anomalies),
    }
}

fn summarize(anomalies: &[Anomaly]) -> DriftSummary {
    if anomalies.is_empty() {
        return DriftSummary::default();
    }

    let drifts: Vec<f64> = anomalies
        .iter()
        .map(|a| a.raw_distance - a.odometer)
        .collect();
    let max_drift = drifts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_drift = drifts.iter().copied().fold(f64::INFINITY, f64::min);
    let mean_drift = drifts.iter().sum::<f64>() / drifts.len() as f64;
    let total_accumulated = drifts[drifts.len() - 1] - drifts[0];

    let span = anomalies[anomalies.len() - 1].raw_distance - anomalies[0].raw_distance;
    let drift_rate_per_1000ft = if span > 0.0 {
        total_accumulated / (span / 1000.0)
    } else {
        0.0
    };

    DriftSummary {
        max_drift,
        min_drift,
        mean_drift,
        total_accumulated,
        drift_rate_per_1000ft,
    }
}
