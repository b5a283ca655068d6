//! Cross-Run Chain Composition
//!
//! Pairwise match results between consecutive runs compose into chains: one
//! chain per physical feature, holding one anomaly per run it was observed
//! in. Chains starting at run 0 extend forward through each pairwise map;
//! features first seen at an intermediate run start their own chains there.
//! Anomalies matched in no pair become singleton chains: `missing` when a
//! later run should have seen them again, `new` when they surface in the
//! final run. Every non-reference anomaly lands in exactly one chain.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::EngineConfig;
use crate::types::{
    Anomaly, AnomalyChain, AnomalyId, GrowthRates, MatchStatus, MatchedPair, PairMatchResult,
    PriorityBand,
};

/// Compose pairwise results into chains.
///
/// `anomalies_by_run[k]` holds run k's non-reference anomalies in display
/// order; `pair_results[k]` is the match outcome between runs k and k+1.
/// Growth and priority decorations are left at their defaults for the
/// analysis stage to fill in.
pub fn build_chains(
    pair_results: &[PairMatchResult],
    anomalies_by_run: &[Vec<&Anomaly>],
    config: &EngineConfig,
) -> Vec<AnomalyChain> {
    let run_count = anomalies_by_run.len();
    let lookup: HashMap<AnomalyId, &Anomaly> = anomalies_by_run
        .iter()
        .flatten()
        .map(|a| (a.id, *a))
        .collect();

    // Forward maps: run k's matched anomaly → its pair into run k+1.
    let forward: Vec<HashMap<AnomalyId, &MatchedPair>> = pair_results
        .iter()
        .map(|result| result.pairs.iter().map(|p| (p.a, p)).collect())
        .collect();

    let mut consumed: HashSet<AnomalyId> = HashSet::new();
    let mut chains = Vec::new();

    // Chains seeded by pairs, earliest runs first so run-0 chains claim
    // their members before intermediate-run chains can.
    for (k, result) in pair_results.iter().enumerate() {
        for pair in &result.pairs {
            if consumed.contains(&pair.a) {
                continue;
            }
            chains.push(extend_chain(k, pair, &forward, &lookup, &mut consumed, config));
        }
    }

    // Singletons: anything never consumed by a pair chain.
    for (k, run) in anomalies_by_run.iter().enumerate() {
        for anomaly in run {
            if consumed.contains(&anomaly.id) {
                continue;
            }
            let status = if k + 1 == run_count {
                MatchStatus::New
            } else {
                MatchStatus::Missing
            };
            chains.push(singleton_chain(anomaly, status));
        }
    }

    debug!(
        chains = chains.len(),
        matched = chains.iter().filter(|c| c.status == MatchStatus::Matched).count(),
        uncertain = chains.iter().filter(|c| c.status == MatchStatus::Uncertain).count(),
        "composed anomaly chains"
    );
    chains
}

fn extend_chain(
    start_pair_index: usize,
    first_pair: &MatchedPair,
    forward: &[HashMap<AnomalyId, &MatchedPair>],
    lookup: &HashMap<AnomalyId, &Anomaly>,
    consumed: &mut HashSet<AnomalyId>,
    config: &EngineConfig,
) -> AnomalyChain {
    let mut members = vec![first_pair.a, first_pair.b];
    consumed.insert(first_pair.a);
    consumed.insert(first_pair.b);

    let mut last_pair = first_pair;
    let mut cursor = first_pair.b;
    for map in forward.iter().skip(start_pair_index + 1) {
        let Some(&next_pair) = map.get(&cursor) else {
            break;
        };
        members.push(next_pair.b);
        consumed.insert(next_pair.b);
        cursor = next_pair.b;
        last_pair = next_pair;
    }

    let status = if first_pair.confidence >= config.confident_match_threshold {
        MatchStatus::Matched
    } else {
        MatchStatus::Uncertain
    };

    // The latest observation represents the chain.
    let latest_id = *members.last().unwrap_or(&first_pair.b);
    let latest = lookup[&latest_id];

    AnomalyChain {
        member_indices: Vec::new(),
        run_indices: members.iter().map(|id| id.run_index).collect(),
        members,
        confidence: first_pair.confidence,
        status,
        similarity: Some(last_pair.similarity),
        station_delta_ft: last_pair.station_delta_ft,
        growth: GrowthRates::default(),
        priority: PriorityBand::default(),
        position: latest.corrected_distance,
        clock_degrees: latest.clock_degrees,
        feature_type: latest.feature_type,
        latest_depth_percent: latest.depth_percent,
    }
}

fn singleton_chain(anomaly: &Anomaly, status: MatchStatus) -> AnomalyChain {
    AnomalyChain {
        member_indices: Vec::new(),
        members: vec![anomaly.id],
        run_indices: vec![anomaly.id.run_index],
        confidence: 0.0,
        status,
        similarity: None,
        station_delta_ft: 0.0,
        growth: GrowthRates::default(),
        priority: PriorityBand::default(),
        position: anomaly.corrected_distance,
        clock_degrees: anomaly.clock_degrees,
        feature_type: anomaly.feature_type,
        latest_depth_percent: anomaly.depth_percent,
    }
}
