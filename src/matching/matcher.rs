//! Bipartite Anomaly Matching
//!
//! For one consecutive run pair: gate candidate pairs on corrected-distance
//! proximity and a minimum similarity, build a square cost matrix (1 − total
//! for candidates, a large sentinel elsewhere, zero on padding rows and
//! columns), solve the assignment exactly, then accept only pairs whose
//! similarity clears the acceptance threshold. Unmatched earlier-run
//! anomalies come back as missing; unmatched later-run anomalies as new.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::EngineConfig;
use crate::matching::{hungarian, similarity};
use crate::types::thresholds::matching_defaults::NON_CANDIDATE_COST;
use crate::types::{Anomaly, MatchedPair, PairMatchResult, Similarity};

/// Match the non-reference anomalies of two consecutive runs.
///
/// `anomalies_a` and `anomalies_b` must already carry corrected distances in
/// the common (reference-run) frame.
pub fn match_pair(
    run_a: usize,
    run_b: usize,
    anomalies_a: &[&Anomaly],
    anomalies_b: &[&Anomaly],
    config: &EngineConfig,
) -> PairMatchResult {
    let size = anomalies_a.len().max(anomalies_b.len());
    if size == 0 {
        return PairMatchResult {
            run_a,
            run_b,
            pairs: Vec::new(),
            missing: Vec::new(),
            new_features: Vec::new(),
        };
    }

    // Candidate similarity cache; non-candidates never get scored twice.
    let mut candidates: HashMap<(usize, usize), Similarity> = HashMap::new();
    let mut cost = vec![vec![0.0f64; size]; size];

    for (i, a) in anomalies_a.iter().enumerate() {
        for (j, b) in anomalies_b.iter().enumerate() {
            let gap = (a.corrected_distance - b.corrected_distance).abs();
            if gap > config.candidate_distance_tolerance_ft {
                cost[i][j] = NON_CANDIDATE_COST;
                continue;
            }
            let sim = similarity::score(a, b, config);
            if sim.total > config.min_candidate_similarity {
                cost[i][j] = 1.0 - sim.total;
                candidates.insert((i, j), sim);
            } else {
                cost[i][j] = NON_CANDIDATE_COST;
            }
        }
    }
    // Padding rows/columns beyond the real index ranges stay at zero cost.

    let assignment = hungarian::solve(&cost);

    let mut pairs = Vec::new();
    let mut matched_a: HashSet<usize> = HashSet::new();
    let mut matched_b: HashSet<usize> = HashSet::new();

    for (i, a) in anomalies_a.iter().enumerate() {
        let j = assignment[i];
        if j >= anomalies_b.len() {
            continue;
        }
        let Some(sim) = candidates.get(&(i, j)) else {
            continue;
        };
        if sim.total < config.min_match_similarity {
            continue;
        }
        let b = anomalies_b[j];
        pairs.push(MatchedPair {
            a: a.id,
            b: b.id,
            similarity: *sim,
            confidence: sim.total,
            station_delta_ft: b.corrected_distance - a.corrected_distance,
        });
        matched_a.insert(i);
        matched_b.insert(j);
    }

    let missing = anomalies_a
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched_a.contains(i))
        .map(|(_, a)| a.id)
        .collect();
    let new_features = anomalies_b
        .iter()
        .enumerate()
        .filter(|(j, _)| !matched_b.contains(j))
        .map(|(_, b)| b.id)
        .collect();

    let result = PairMatchResult {
        run_a,
        run_b,
        pairs,
        missing,
        new_features,
    };
    debug!(
        run_a,
        run_b,
        pairs = result.pairs.len(),
        missing = result.missing.len(),
        new = result.new_features.len(),
        "matched anomaly pair"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnomalyId, FeatureType};
    use std::collections::HashSet;

    fn make_anomaly(run: usize, row: usize, corrected: f64, depth: f64) -> Anomaly {
        Anomaly {
            id: AnomalyId::new(run, row),
            feature_id: None,
            raw_distance: corrected,
            odometer: corrected,
            corrected_distance: corrected,
            joint_number: 0,
            clock_degrees: 90.0,
            feature_type: FeatureType::MetalLoss,
            depth_percent: depth,
            length: 4.0,
            width: 2.0,
            wall_thickness: 0.375,
            cleaning_flags: Vec::new(),
            has_missing_data: false,
            extras: Default::default(),
        }
    }

    fn refs(anomalies: &[Anomaly]) -> Vec<&Anomaly> {
        anomalies.iter().collect()
    }

    #[test]
    fn identical_runs_match_completely() {
        let a: Vec<Anomaly> = (0..5)
            .map(|i| make_anomaly(0, i, 1000.0 + i as f64 * 300.0, 30.0))
            .collect();
        let b: Vec<Anomaly> = (0..5)
            .map(|i| make_anomaly(1, i, 1000.0 + i as f64 * 300.0, 30.0))
            .collect();
        let result = match_pair(0, 1, &refs(&a), &refs(&b), &EngineConfig::default());

        assert_eq!(result.pairs.len(), 5);
        assert!(result.missing.is_empty());
        assert!(result.new_features.is_empty());
        for pair in &result.pairs {
            assert!(pair.confidence > 0.99);
            assert_eq!(pair.station_delta_ft, 0.0);
        }
    }

    #[test]
    fn distant_anomalies_never_match() {
        let a = vec![make_anomaly(0, 0, 1000.0, 30.0)];
        let b = vec![make_anomaly(1, 0, 1300.0, 30.0)];
        let result = match_pair(0, 1, &refs(&a), &refs(&b), &EngineConfig::default());

        assert!(result.pairs.is_empty());
        assert_eq!(result.missing, vec![AnomalyId::new(0, 0)]);
        assert_eq!(result.new_features, vec![AnomalyId::new(1, 0)]);
    }

    #[test]
    fn assignment_is_injective_per_run_pair() {
        // Three a-anomalies clustered around two b-anomalies
        let a = vec![
            make_anomaly(0, 0, 1000.0, 30.0),
            make_anomaly(0, 1, 1010.0, 31.0),
            make_anomaly(0, 2, 1020.0, 29.0),
        ];
        let b = vec![
            make_anomaly(1, 0, 1005.0, 30.0),
            make_anomaly(1, 1, 1015.0, 31.0),
        ];
        let result = match_pair(0, 1, &refs(&a), &refs(&b), &EngineConfig::default());

        let b_ids: HashSet<AnomalyId> = result.pairs.iter().map(|p| p.b).collect();
        assert_eq!(b_ids.len(), result.pairs.len(), "each b used at most once");
        let a_ids: HashSet<AnomalyId> = result.pairs.iter().map(|p| p.a).collect();
        assert_eq!(a_ids.len(), result.pairs.len(), "each a used at most once");
        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.missing.len(), 1);
    }

    #[test]
    fn every_anomaly_lands_in_exactly_one_bucket() {
        let a: Vec<Anomaly> = (0..4)
            .map(|i| make_anomaly(0, i, 1000.0 + i as f64 * 500.0, 25.0))
            .collect();
        // Two survive, one appears
        let b = vec![
            make_anomaly(1, 0, 1000.0, 27.0),
            make_anomaly(1, 1, 1500.0, 30.0),
            make_anomaly(1, 2, 9000.0, 10.0),
        ];
        let result = match_pair(0, 1, &refs(&a), &refs(&b), &EngineConfig::default());

        assert_eq!(result.pairs.len() + result.missing.len(), a.len());
        assert_eq!(result.pairs.len() + result.new_features.len(), b.len());
    }

    #[test]
    fn close_cluster_resolves_to_two_accepted_pairs() {
        // Two a-anomalies compete for the nearer b; the exact solver keeps
        // both pairs instead of letting one side starve.
        let a = vec![
            make_anomaly(0, 0, 1000.0, 30.0),
            make_anomaly(0, 1, 1004.0, 30.0),
        ];
        let b = vec![
            make_anomaly(1, 0, 1002.0, 30.0),
            make_anomaly(1, 1, 1040.0, 30.0),
        ];
        let result = match_pair(0, 1, &refs(&a), &refs(&b), &EngineConfig::default());
        assert_eq!(result.pairs.len(), 2, "both pairs should be accepted");
    }

    #[test]
    fn empty_sides_are_not_an_error() {
        let a = vec![make_anomaly(0, 0, 1000.0, 30.0)];
        let result = match_pair(0, 1, &refs(&a), &[], &EngineConfig::default());
        assert!(result.pairs.is_empty());
        assert_eq!(result.missing.len(), 1);

        let result = match_pair(0, 1, &[], &[], &EngineConfig::default());
        assert!(result.pairs.is_empty());
        assert!(result.missing.is_empty());
        assert!(result.new_features.is_empty());
    }
}
