//! Reference extraction and greedy cross-run pairing
//!
//! Girth welds, valves, and fittings are fixed physical features, so their
//! distance sequence anchors the coordinate alignment. Pairing is greedy in
//! order of the earlier run: each reference takes the best unmatched
//! candidate within tolerance, scored by distance gap plus a joint-number
//! penalty. The result is injective by construction.

use tracing::debug;

use crate::config::EngineConfig;
use crate::types::{Anomaly, MatchedReference, ReferencePoint};

/// Project a run's reference-type anomalies, sorted by distance.
pub fn extract_references(anomalies: &[Anomaly]) -> Vec<ReferencePoint> {
    let mut references: Vec<ReferencePoint> = anomalies
        .iter()
        .filter(|a| a.is_reference_point())
        .map(|a| ReferencePoint {
            id: a.id,
            distance: a.raw_distance,
            odometer: a.odometer,
            joint_number: a.joint_number,
            feature_type: a.feature_type,
            run_index: a.id.run_index,
        })
        .collect();
    references.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    references
}

/// Pair two runs' reference lists.
///
/// For each reference in `refs_a` (in order) the best unmatched candidate in
/// `refs_b` within `reference_match_tolerance_ft` wins, scored by
/// `|Δdistance| + joint_penalty`. Ties keep the earlier `refs_b` index.
/// References with no qualifying candidate stay unmatched.
pub fn match_references(
    refs_a: &[ReferencePoint],
    refs_b: &[ReferencePoint],
    config: &EngineConfig,
) -> Vec<MatchedReference> {
    if refs_a.is_empty() || refs_b.is_empty() {
        return Vec::new();
    }

    let mut used_b = vec![false; refs_b.len()];
    let mut pairs = Vec::new();

    for ref_a in refs_a {
        let mut best: Option<(usize, f64)> = None;
        for (j, ref_b) in refs_b.iter().enumerate() {
            if used_b[j] {
                continue;
            }
            let distance_gap = (ref_a.distance - ref_b.distance).abs();
            if distance_gap > config.reference_match_tolerance_ft {
                continue;
            }
            let joint_penalty = if ref_a.joint_number > 0 && ref_b.joint_number > 0 {
                let joint_gap =
                    (i64::from(ref_a.joint_number) - i64::from(ref_b.joint_number)).abs();
                joint_gap as f64 * config.joint_mismatch_penalty_ft
            } else {
                0.0
            };
            let score = distance_gap + joint_penalty;
            // Strict less keeps the earliest index on ties
            if best.map_or(true, |(_, best_score)| score < best_score) {
                best = Some((j, score));
            }
        }

        if let Some((j, _)) = best {
            used_b[j] = true;
            let ref_b = &refs_b[j];
            pairs.push(MatchedReference {
                distance_offset: ref_b.distance - ref_a.distance,
                odometer_drift: (ref_b.distance - ref_b.odometer)
                    - (ref_a.distance - ref_a.odometer),
                ref_a: ref_a.clone(),
                ref_b: ref_b.clone(),
            });
        }
    }

    debug!(
        refs_a = refs_a.len(),
        refs_b = refs_b.len(),
        matched = pairs.len(),
        "matched reference points"
    );
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnomalyId, FeatureType};
    use std::collections::HashSet;

    fn make_ref(run: usize, row: usize, distance: f64, joint: u32) -> ReferencePoint {
        ReferencePoint {
            id: AnomalyId::new(run, row),
            distance,
            odometer: distance,
            joint_number: joint,
            feature_type: FeatureType::GirthWeld,
            run_index: run,
        }
    }

    #[test]
    fn nearest_candidate_wins() {
        let a = vec![make_ref(0, 0, 1000.0, 0)];
        let b = vec![make_ref(1, 0, 1100.0, 0), make_ref(1, 1, 1020.0, 0)];
        let pairs = match_references(&a, &b, &EngineConfig::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].ref_b.distance, 1020.0);
        assert_eq!(pairs[0].distance_offset, 20.0);
    }

    #[test]
    fn joint_mismatch_penalty_redirects_choice() {
        let a = vec![make_ref(0, 0, 1000.0, 10)];
        // 1010 is closer but two joints off; 1150 carries the right joint
        let b = vec![make_ref(1, 0, 1010.0, 12), make_ref(1, 1, 1150.0, 10)];
        let pairs = match_references(&a, &b, &EngineConfig::default());
        assert_eq!(pairs[0].ref_b.distance, 1150.0);
    }

    #[test]
    fn unknown_joints_skip_the_penalty() {
        let a = vec![make_ref(0, 0, 1000.0, 10)];
        let b = vec![make_ref(1, 0, 1010.0, 0), make_ref(1, 1, 1150.0, 10)];
        let pairs = match_references(&a, &b, &EngineConfig::default());
        // No penalty against joint 0, so plain proximity wins
        assert_eq!(pairs[0].ref_b.distance, 1010.0);
    }

    #[test]
    fn out_of_tolerance_stays_unmatched() {
        let a = vec![make_ref(0, 0, 1000.0, 0)];
        let b = vec![make_ref(1, 0, 1600.0, 0)];
        let pairs = match_references(&a, &b, &EngineConfig::default());
        assert!(pairs.is_empty());
    }

    #[test]
    fn matching_is_injective() {
        let a: Vec<_> = (0..10).map(|i| make_ref(0, i, i as f64 * 40.0, 0)).collect();
        // Every a-ref is within tolerance of every b-ref
        let b: Vec<_> = (0..4).map(|i| make_ref(1, i, i as f64 * 40.0 + 5.0, 0)).collect();
        let pairs = match_references(&a, &b, &EngineConfig::default());

        let b_rows: HashSet<usize> = pairs.iter().map(|p| p.ref_b.id.row_index).collect();
        assert_eq!(b_rows.len(), pairs.len(), "no b-ref may pair twice");
        let a_rows: HashSet<usize> = pairs.iter().map(|p| p.ref_a.id.row_index).collect();
        assert_eq!(a_rows.len(), pairs.len(), "no a-ref may pair twice");
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn odometer_drift_measures_relative_slip() {
        let mut a = make_ref(0, 0, 1000.0, 0);
        a.odometer = 995.0; // drift +5
        let mut b = make_ref(1, 0, 1050.0, 0);
        b.odometer = 1030.0; // drift +20
        let pairs = match_references(&[a], &[b], &EngineConfig::default());
        assert_eq!(pairs[0].odometer_drift, 15.0);
        assert_eq!(pairs[0].distance_offset, 50.0);
    }

    #[test]
    fn empty_sides_produce_no_pairs() {
        let refs = vec![make_ref(0, 0, 100.0, 0)];
        assert!(match_references(&refs, &[], &EngineConfig::default()).is_empty());
        assert!(match_references(&[], &refs, &EngineConfig::default()).is_empty());
    }

    #[test]
    fn extraction_filters_and_sorts() {
        use crate::types::Anomaly;
        let mut weld = Anomaly {
            id: AnomalyId::new(0, 0),
            feature_id: None,
            raw_distance: 500.0,
            odometer: 498.0,
            corrected_distance: 500.0,
            joint_number: 7,
            clock_degrees: 0.0,
            feature_type: FeatureType::GirthWeld,
            depth_percent: 0.0,
            length: 0.0,
            width: 0.0,
            wall_thickness: 0.375,
            cleaning_flags: Vec::new(),
            has_missing_data: false,
            extras: Default::default(),
        };
        let mut loss = weld.clone();
        loss.id = AnomalyId::new(0, 1);
        loss.feature_type = FeatureType::MetalLoss;
        loss.raw_distance = 100.0;
        weld.raw_distance = 500.0;
        let mut valve = weld.clone();
        valve.id = AnomalyId::new(0, 2);
        valve.feature_type = FeatureType::Valve;
        valve.raw_distance = 200.0;

        let refs = extract_references(&[weld, loss, valve]);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].distance, 200.0);
        assert_eq!(refs[1].distance, 500.0);
        assert_eq!(refs[1].joint_number, 7);
    }
}
