//! Cross-Run Anomaly Matching
//!
//! - `similarity`: weighted multi-metric anomaly-to-anomaly score
//! - `hungarian`: exact minimum-cost one-to-one assignment
//! - `matcher`: candidate filtering, cost matrix, and acceptance for one
//!   consecutive run pair
//! - `chainer`: composition of pairwise results into K-run chains

pub mod chainer;
pub mod hungarian;
pub mod matcher;
pub mod similarity;

pub use chainer::build_chains;
pub use matcher::match_pair;
pub use similarity::score;
