//! Replaced-Section Detection
//!
//! A pipe section cut out between inspections leaves a span of consecutive
//! earlier-run references with no later counterpart; the replacement spool
//! leaves the mirror image in the later run. This detector clusters
//! unmatched references and reports spans of two or more as removed/added
//! sections. The output is advisory: it feeds logging and review, never the
//! distance correction itself.

use std::collections::HashSet;

use tracing::warn;

use crate::config::EngineConfig;
use crate::types::{AnomalyId, MatchedReference, ReferencePoint, ReplacedSection, SectionKind};

/// Detect removed sections in `refs_a` and added sections in `refs_b`.
///
/// Both lists must be distance-sorted (as `extract_references` returns
/// them). A cluster is a run of unmatched references uninterrupted by any
/// matched one, with successive gaps no wider than
/// `replacement_cluster_gap_ft`.
pub fn detect_replaced_sections(
    refs_a: &[ReferencePoint],
    refs_b: &[ReferencePoint],
    pairs: &[MatchedReference],
    config: &EngineConfig,
) -> Vec<ReplacedSection> {
    let matched_a: HashSet<AnomalyId> = pairs.iter().map(|p| p.ref_a.id).collect();
    let matched_b: HashSet<AnomalyId> = pairs.iter().map(|p| p.ref_b.id).collect();

    let mut sections = cluster_unmatched(refs_a, &matched_a, SectionKind::Removed, config);
    sections.extend(cluster_unmatched(refs_b, &matched_b, SectionKind::Added, config));

    for section in &sections {
        warn!(
            run_index = section.run_index,
            kind = ?section.kind,
            start_ft = section.start_distance,
            end_ft = section.end_distance,
            references = section.reference_count,
            "possible pipe replacement"
        );
    }
    sections
}

fn cluster_unmatched(
    references: &[ReferencePoint],
    matched: &HashSet<AnomalyId>,
    kind: SectionKind,
    config: &EngineConfig,
) -> Vec<ReplacedSection> {
    let mut sections = Vec::new();
    let mut cluster: Vec<&ReferencePoint> = Vec::new();

    for reference in references {
        if matched.contains(&reference.id) {
            flush(&mut cluster, kind, &mut sections);
            continue;
        }
        if let Some(last) = cluster.last() {
            if reference.distance - last.distance > config.replacement_cluster_gap_ft {
                flush(&mut cluster, kind, &mut sections);
            }
        }
        cluster.push(reference);
    }
    flush(&mut cluster, kind, &mut sections);
    sections
}

fn flush(
    cluster: &mut Vec<&ReferencePoint>,
    kind: SectionKind,
    sections: &mut Vec<ReplacedSection>,
) {
    use crate::types::thresholds::alignment_defaults::REPLACEMENT_MIN_RUN;
    if cluster.len() >= REPLACEMENT_MIN_RUN {
        sections.push(ReplacedSection {
            run_index: cluster[0].run_index,
            kind,
            start_distance: cluster[0].distance,
            end_distance: cluster[cluster.len() - 1].distance,
            reference_count: cluster.len(),
        });
    }
    cluster.clear();
}
