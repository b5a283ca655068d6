//! Piecewise-Linear Distance Correction
//!
//! Consecutive matched reference pairs bound alignment zones; within a zone
//! the later run's raw distance maps affinely onto the reference run's
//! coordinate. Outside the matched span, distances translate by the nearest
//! pair's offset. The map is continuous: adjacent zones share their boundary
//! pair, so both send the boundary to the same canonical distance.

use tracing::debug;

use crate::config::EngineConfig;
use crate::types::{AlignmentZone, Anomaly, MatchedReference};

/// Build alignment zones from matched reference pairs.
///
/// Pairs are ordered by the canonical (run A) distance; every consecutive
/// pair of pairs produces one zone for `run_index` (the later run).
pub fn build_zones(
    pairs: &[MatchedReference],
    run_index: usize,
    config: &EngineConfig,
) -> Vec<AlignmentZone> {
    let mut ordered: Vec<&MatchedReference> = pairs.iter().collect();
    ordered.sort_by(|a, b| a.ref_a.distance.total_cmp(&b.ref_a.distance));

    let zones: Vec<AlignmentZone> = ordered
        .windows(2)
        .map(|window| {
            let (p, q) = (window[0], window[1]);
            let start_raw = p.ref_b.distance;
            let end_raw = q.ref_b.distance;
            let start_canonical = p.ref_a.distance;
            let end_canonical = q.ref_a.distance;
            let canonical_span = end_canonical - start_canonical;
            let correction_factor = if canonical_span <= 0.0 {
                1.0
            } else {
                (end_raw - start_raw) / canonical_span
            };
            AlignmentZone {
                run_index,
                start_raw,
                end_raw,
                start_canonical,
                end_canonical,
                correction_factor,
                is_pipe_replacement: (correction_factor - 1.0).abs()
                    > config.replacement_factor_tolerance,
            }
        })
        .collect();

    debug!(
        run_index,
        zones = zones.len(),
        replacements = zones.iter().filter(|z| z.is_pipe_replacement).count(),
        "built alignment zones"
    );
    zones
}

/// Map one raw distance of the later run into the reference run's frame.
///
/// Inside a non-degenerate zone the map interpolates linearly; outside the
/// matched span (or inside a degenerate zone) the nearest pair's offset
/// translates the distance. With no pairs at all the distance is unchanged.
pub fn correct_distance(raw: f64, zones: &[AlignmentZone], pairs: &[MatchedReference]) -> f64 {
    if pairs.is_empty() {
        return raw;
    }

    if let Some(zone) = zones
        .iter()
        .find(|z| z.start_raw <= raw && raw <= z.end_raw && z.end_raw > z.start_raw)
    {
        let fraction = (raw - zone.start_raw) / (zone.end_raw - zone.start_raw);
        return zone.start_canonical
            + fraction * (zone.end_canonical - zone.start_canonical);
    }

    // Before the first pair, past the last, or inside a degenerate zone:
    // translate by the nearest pair's offset.
    let mut nearest = &pairs[0];
    for pair in &pairs[1..] {
        if (pair.ref_b.distance - raw).abs() < (nearest.ref_b.distance - raw).abs() {
            nearest = pair;
        }
    }
    raw + (nearest.ref_a.distance - nearest.ref_b.distance)
}

/// Assign `corrected_distance` for every anomaly of the later run.
pub fn apply_correction(
    anomalies: &mut [Anomaly],
    zones: &[AlignmentZone],
    pairs: &[MatchedReference],
) {
    for anomaly in anomalies.iter_mut() {
        anomaly.corrected_distance = correct_distance(anomaly.raw_distance, zones, pairs);
    }
}
