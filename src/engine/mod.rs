//! Engine Orchestration
//!
//! Drives the full pipeline over K inspection runs: normalize → clean →
//! extract references → align each later run to run 0 → measure drift →
//! match anomalies pairwise → compose chains → fit growth → classify
//! priority. The engine is a pure function of its inputs; only structural
//! caller misuse (too few runs, mismatched years) errors out, while
//! degenerate data produces partial results with explanatory reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::alignment::{
    apply_correction, build_zones, detect_replaced_sections, extract_references,
    match_references, run_drift,
};
use crate::analysis::{analyze_growth, classify};
use crate::cleaner::clean_run;
use crate::config::EngineConfig;
use crate::matching::{build_chains, match_pair};
use crate::normalizer::normalize_run;
use crate::types::{
    AlignmentZone, Anomaly, AnomalyChain, AnomalyId, CleaningReport, RawRecord, ReplacedSection,
    RunDrift,
};

/// Structural misuse by the caller. Data-quality problems never error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("at least two inspection runs are required, got {0}")]
    InsufficientRuns(usize),
    #[error("{runs} runs were provided with {years} years; counts must match")]
    RunYearMismatch { runs: usize, years: usize },
}

/// Everything the pipeline produces for one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    /// All cleaned anomalies across all runs, with corrected distances
    /// assigned, ordered by run then distance
    pub aligned_anomalies: Vec<Anomaly>,
    /// One chain per physical feature
    pub chains: Vec<AnomalyChain>,
    /// Alignment zones for every later run
    pub alignment_zones: Vec<AlignmentZone>,
    /// Per-run drift diagnostics
    pub drift_points: Vec<RunDrift>,
    /// Per-run cleaning audit
    pub cleaning_reports: Vec<CleaningReport>,
    /// Advisory replaced-section findings
    pub replaced_sections: Vec<ReplacedSection>,
}

/// The alignment and matching engine.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline.
    ///
    /// `runs[k]` is one inspection's raw rows and `years[k]` its inspection
    /// year. Runs are processed in ascending year order; the earliest run
    /// defines the common coordinate system.
    pub fn run(
        &self,
        runs: Vec<Vec<RawRecord>>,
        years: Vec<i32>,
    ) -> Result<EngineResult, EngineError> {
        if runs.len() < 2 {
            return Err(EngineError::InsufficientRuns(runs.len()));
        }
        if runs.len() != years.len() {
            return Err(EngineError::RunYearMismatch {
                runs: runs.len(),
                years: years.len(),
            });
        }

        // Stable year sort so equal years keep their input order.
        let mut ordered: Vec<(i32, Vec<RawRecord>)> = years.into_iter().zip(runs).collect();
        ordered.sort_by_key(|(year, _)| *year);
        let years: Vec<i32> = ordered.iter().map(|(year, _)| *year).collect();

        info!(runs = ordered.len(), ?years, "engine starting");

        let normalized: Vec<Vec<Anomaly>> = ordered
            .iter()
            .enumerate()
            .map(|(run_index, (_, rows))| normalize_run(rows, run_index))
            .collect();

        let mut cleaned: Vec<Vec<Anomaly>> = Vec::with_capacity(normalized.len());
        let mut cleaning_reports: Vec<CleaningReport> = Vec::with_capacity(normalized.len());
        for run_index in 0..normalized.len() {
            let others: Vec<&[Anomaly]> = normalized
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != run_index)
                .map(|(_, run)| run.as_slice())
                .collect();
            let (run, report) = clean_run(
                normalized[run_index].clone(),
                &others,
                run_index,
                years[run_index],
            );
            cleaned.push(run);
            cleaning_reports.push(report);
        }

        // References come off the cleaned rows, before any correction, so
        // pairing and zone building work in raw coordinates.
        let references: Vec<_> = cleaned.iter().map(|run| extract_references(run)).collect();

        let mut alignment_zones: Vec<AlignmentZone> = Vec::new();
        let mut replaced_sections: Vec<ReplacedSection> = Vec::new();
        for run_index in 1..cleaned.len() {
            let pairs = match_references(&references[0], &references[run_index], &self.config);
            replaced_sections.extend(detect_replaced_sections(
                &references[0],
                &references[run_index],
                &pairs,
                &self.config,
            ));
            let zones = build_zones(&pairs, run_index, &self.config);
            apply_correction(&mut cleaned[run_index], &zones, &pairs);
            alignment_zones.extend(zones);
        }

        let drift_points: Vec<RunDrift> = cleaned
            .iter()
            .enumerate()
            .map(|(run_index, run)| {
                run_drift(
                    run_index,
                    years[run_index],
                    run,
                    &references[run_index],
                    self.config.drift_profile_target_points,
                )
            })
            .collect();

        let defects: Vec<Vec<&Anomaly>> = cleaned
            .iter()
            .map(|run| run.iter().filter(|a| !a.is_reference_point()).collect())
            .collect();

        let pair_results: Vec<_> = (0..defects.len().saturating_sub(1))
            .map(|k| {
                match_pair(k, k + 1, &defects[k], &defects[k + 1], &self.config)
            })
            .collect();

        let mut chains = build_chains(&pair_results, &defects, &self.config);

        let lookup: HashMap<AnomalyId, &Anomaly> = cleaned
            .iter()
            .flatten()
            .map(|a| (a.id, a))
            .collect();
        for chain in &mut chains {
            let observations: Vec<&Anomaly> =
                chain.members.iter().map(|id| lookup[id]).collect();
            let chain_years: Vec<f64> = chain
                .run_indices
                .iter()
                .map(|&run_index| f64::from(years[run_index]))
                .collect();
            chain.growth = analyze_growth(
                &observations,
                &chain_years,
                self.config.critical_depth_percent,
            );
            chain.priority = classify(chain.latest_depth_percent, &chain.growth);
        }

        // Flatten runs into one list and point chains at it by index.
        let mut flat_index: HashMap<AnomalyId, usize> = HashMap::new();
        let mut aligned_anomalies: Vec<Anomaly> = Vec::new();
        for run in cleaned {
            for anomaly in run {
                flat_index.insert(anomaly.id, aligned_anomalies.len());
                aligned_anomalies.push(anomaly);
            }
        }
        for chain in &mut chains {
            chain.member_indices = chain.members.iter().map(|id| flat_index[id]).collect();
        }

        info!(
            anomalies = aligned_anomalies.len(),
            chains = chains.len(),
            zones = alignment_zones.len(),
            replaced_sections = replaced_sections.len(),
            "engine finished"
        );

        Ok(EngineResult {
            aligned_anomalies,
            chains,
            alignment_zones,
            drift_points,
            cleaning_reports,
            replaced_sections,
        })
    }
}
