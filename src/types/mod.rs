//! Shared data structures for the ILI alignment and matching pipeline
//!
//! This module defines the core types flowing between engine stages:
//! - Stage 1: RawRecord → Anomaly (normalizer output)
//! - Stage 2: PassReport, CleaningReport (cleaner audit trail)
//! - Stage 3-6: ReferencePoint, MatchedReference, AlignmentZone,
//!   ReplacedSection, drift series (alignment outputs)
//! - Stage 7-9: Similarity, MatchedPair, AnomalyChain (matching outputs)
//! - Stage 10-11: GrowthRates, PriorityBand (analysis decorations)

mod alignment;
mod anomaly;
mod matching;
mod report;
pub mod thresholds;

pub use alignment::*;
pub use anomaly::*;
pub use matching::*;
pub use report::*;
