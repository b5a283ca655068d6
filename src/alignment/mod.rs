//! Coordinate Alignment
//!
//! Anchors every later run to the reference run's longitudinal coordinate:
//! - `reference_matcher`: extract welds/valves/fittings and pair them
//!   between two runs by distance and joint number
//! - `replacement`: spot spans of consecutive unmatched references that
//!   indicate cut-out or added pipe sections
//! - `corrector`: build piecewise-linear zones from matched pairs and remap
//!   every anomaly's distance
//! - `drift`: per-run odometer drift curves and summary statistics

pub mod corrector;
pub mod drift;
pub mod reference_matcher;
pub mod replacement;

pub use corrector::{apply_correction, build_zones, correct_distance};
pub use drift::run_drift;
pub use reference_matcher::{extract_references, match_references};
pub use replacement::detect_replaced_sections;
