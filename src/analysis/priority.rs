//! Priority Classification
//!
//! Rule-based assignment of the five regulatory response bands from the
//! latest observed depth, the absolute depth growth rate, and the projected
//! time-to-critical. Rules evaluate most-urgent first; the first match
//! wins, which keeps the classification monotone in all three inputs.

use crate::types::thresholds::priority_defaults as bands;
use crate::types::{GrowthRates, PriorityBand};

/// Classify one chain from its latest depth and fitted growth.
pub fn classify(latest_depth_percent: f64, growth: &GrowthRates) -> PriorityBand {
    let depth = latest_depth_percent;
    let rate = growth.depth_percent_per_year.abs();
    let ttc = growth.time_to_critical_years;

    let within = |limit: f64| ttc.map_or(false, |years| years <= limit);

    if depth >= bands::IMMEDIATE_DEPTH_PERCENT
        || within(bands::IMMEDIATE_TTC_YEARS)
        || rate >= bands::IMMEDIATE_GROWTH
    {
        PriorityBand::Immediate
    } else if depth >= bands::SIXTY_DAY_DEPTH_PERCENT
        || rate >= bands::SIXTY_DAY_GROWTH
        || within(bands::SIXTY_DAY_TTC_YEARS)
    {
        PriorityBand::SixtyDay
    } else if depth >= bands::ONE_EIGHTY_DAY_DEPTH_PERCENT
        || rate >= bands::ONE_EIGHTY_DAY_GROWTH
    {
        PriorityBand::OneEightyDay
    } else if depth >= bands::SCHEDULED_DEPTH_PERCENT || rate >= bands::SCHEDULED_GROWTH {
        PriorityBand::Scheduled
    } else {
        PriorityBand::Monitor
    }
}
