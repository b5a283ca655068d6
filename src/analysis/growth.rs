//! Growth Regression
//!
//! Fits a least-squares line to each of depth, length, and width against
//! inspection year across a chain's observations. The depth fit also gets a
//! coefficient of determination and a two-tailed Student-t significance so
//! downstream review can tell trend from noise. Time-to-critical projects
//! the fitted depth slope to the critical threshold.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::types::{Anomaly, GrowthRates};

/// A fitted line y = slope·x + intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Least-squares fit. With fewer than two points, or all x equal, the slope
/// is 0 and the intercept is the mean of y.
pub fn least_squares(xs: &[f64], ys: &[f64]) -> FitLine {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return FitLine {
            slope: 0.0,
            intercept: 0.0,
        };
    }
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;
    if n < 2 {
        return FitLine {
            slope: 0.0,
            intercept: mean_y,
        };
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (x, y) in xs[..n].iter().zip(ys[..n].iter()) {
        sum_xy += (x - mean_x) * (y - mean_y);
        sum_xx += (x - mean_x) * (x - mean_x);
    }

    if sum_xx.abs() < 1e-10 {
        return FitLine {
            slope: 0.0,
            intercept: mean_y,
        };
    }
    let slope = sum_xy / sum_xx;
    FitLine {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

/// Coefficient of determination of a fitted line against the data.
pub fn r_squared(xs: &[f64], ys: &[f64], fit: FitLine) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (x, y) in xs[..n].iter().zip(ys[..n].iter()) {
        let predicted = fit.slope * x + fit.intercept;
        ss_res += (y - predicted) * (y - predicted);
        ss_tot += (y - mean_y) * (y - mean_y);
    }
    if ss_tot < 1e-10 {
        // A flat series is explained perfectly by its own mean
        return if ss_res < 1e-10 { 1.0 } else { 0.0 };
    }
    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator =
        ((n * sum_x2 - sum_x.powi(2)) * (n * sum_y2 - sum_y.powi(2))).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Two-tailed p-value for a Pearson correlation over n samples, via the
/// Student-t distribution with n−2 degrees of freedom.
fn p_value_for_r(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    if r.abs() >= 0.9999 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t_stat = r * df.sqrt() / (1.0 - r * r).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_stat.abs())),
        Err(_) => 1.0,
    }
}

/// Fit growth rates for one chain.
///
/// `observations` are the chain members ordered by run; `years` are the
/// matching inspection years. Singleton chains get zero rates and no
/// time-to-critical.
pub fn analyze_growth(
    observations: &[&Anomaly],
    years: &[f64],
    critical_depth_percent: f64,
) -> GrowthRates {
    let n = observations.len().min(years.len());
    if n < 2 {
        let current_depth = observations.first().map_or(0.0, |a| a.depth_percent);
        return GrowthRates {
            time_to_critical_years: if current_depth >= critical_depth_percent {
                Some(0.0)
            } else {
                None
            },
            ..GrowthRates::default()
        };
    }

    let xs = &years[..n];
    let depths: Vec<f64> = observations[..n].iter().map(|a| a.depth_percent).collect();
    let lengths: Vec<f64> = observations[..n].iter().map(|a| a.length).collect();
    let widths: Vec<f64> = observations[..n].iter().map(|a| a.width).collect();

    let depth_fit = least_squares(xs, &depths);
    let length_fit = least_squares(xs, &lengths);
    let width_fit = least_squares(xs, &widths);

    let current_depth = depths[n - 1];
    let time_to_critical_years = if current_depth >= critical_depth_percent {
        Some(0.0)
    } else if depth_fit.slope > 0.0 {
        Some((critical_depth_percent - current_depth) / depth_fit.slope)
    } else {
        None
    };

    let p_value = if n >= 3 {
        Some(p_value_for_r(pearson(xs, &depths), n))
    } else {
        None
    };

    GrowthRates {
        depth_percent_per_year: depth_fit.slope,
        length_in_per_year: length_fit.slope,
        width_in_per_year: width_fit.slope,
        r_squared: r_squared(xs, &depths, depth_fit),
        p_value,
        time_to_critical_years,
    }
}
