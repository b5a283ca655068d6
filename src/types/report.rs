//! Cleaning audit reports

use serde::{Deserialize, Serialize};

/// Audit record for a single cleaning pass over one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// Stable pass identifier, e.g. `"duplicate_removal"`
    pub name: String,
    /// Human-readable account of what the pass did (or why it was skipped)
    pub description: String,
    /// Rows the pass modified or removed
    pub rows_affected: usize,
    /// Per-row detail lines
    pub details: Vec<String>,
}

/// Aggregated audit for one run's trip through the seven-pass cleaner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub run_index: usize,
    pub year: i32,
    /// Row count entering the cleaner
    pub initial_count: usize,
    /// Row count after all passes
    pub final_count: usize,
    pub passes: Vec<PassReport>,
    /// Total cleaning flags carried by the cleaned rows
    pub total_flags: usize,
}
