//! PIGMATCH: ILI Run Alignment & Anomaly Matching
//!
//! In-line inspection (ILI) tools report the same physical pipeline defect at
//! different distances from run to run: odometer wheels slip, and pipe sections
//! get cut out and replaced between inspections. This crate re-aligns K
//! inspection runs onto a common longitudinal coordinate, matches anomalies
//! one-to-one across runs, estimates per-defect growth, and assigns a
//! regulatory priority band.
//!
//! ## Pipeline
//!
//! - **Normalizer**: vendor rows → canonical [`types::Anomaly`] records
//! - **Cleaner**: seven-pass data-quality pipeline with a per-run audit report
//! - **Alignment**: reference matching, replaced-section detection,
//!   piecewise-linear distance correction, odometer drift reporting
//! - **Matching**: weighted similarity, Hungarian assignment, cross-run chains
//! - **Analysis**: growth regression, time-to-critical, priority classification
//!
//! The engine is a pure batch transform: no I/O, no persistence, no shared
//! state. Feed it K run tables plus their inspection years and read back an
//! [`engine::EngineResult`].

pub mod alignment;
pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod engine;
pub mod matching;
pub mod normalizer;
pub mod types;

// Re-export the entry points
pub use config::{ConfigError, EngineConfig, SimilarityWeights};
pub use engine::{Engine, EngineError, EngineResult};

// Re-export commonly used types
pub use types::{
    AlignmentZone, Anomaly, AnomalyChain, AnomalyId, CleaningReport, ClockField, DriftPoint,
    DriftSummary, FeatureType, GrowthRates, MatchStatus, MatchedPair, MatchedReference,
    PairMatchResult, PassReport, PriorityBand, RawRecord, ReferencePoint, ReplacedSection,
    RunDrift, SectionKind, Similarity,
};
