//! Chain Analysis
//!
//! Decorates composed chains with time-series results:
//! - `growth`: least-squares growth rates, fit quality, time-to-critical
//! - `priority`: rule-based regulatory response band

pub mod growth;
pub mod priority;

pub use growth::analyze_growth;
pub use priority::classify;
