//! Run Normalization
//!
//! Turns canonical-named raw rows into typed, bounded [`Anomaly`] records:
//! - Clock positions in `"H:MM"`, decimal-hour, or degree form → degrees
//! - Free-text feature descriptions → [`FeatureType`] via substring table
//! - Missing numerics filled with documented defaults, bounded fields clamped
//! - Output sorted by reported distance
//!
//! Normalization never fails. Rows with no recoverable data are still
//! emitted, with `has_missing_data` set, so downstream cleaning and matching
//! can account for them.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::types::{Anomaly, AnomalyId, ClockField, FeatureType, RawRecord};

/// Wall thickness assumed when the sheet omits it (in). Standard line pipe.
pub const DEFAULT_WALL_THICKNESS_IN: f64 = 0.375;

/// Ordered substring table mapping vendor feature descriptions to canonical
/// types. First match wins, so compound names ("external metal loss") are
/// listed before their generic fallbacks ("metal loss").
const FEATURE_TYPE_TABLE: &[(&str, FeatureType)] = &[
    ("girth weld", FeatureType::GirthWeld),
    ("girthweld", FeatureType::GirthWeld),
    ("girth", FeatureType::GirthWeld),
    ("seam weld", FeatureType::SeamWeld),
    ("seamweld", FeatureType::SeamWeld),
    ("seam", FeatureType::SeamWeld),
    ("weld", FeatureType::GirthWeld),
    ("valve", FeatureType::Valve),
    ("casing", FeatureType::Casing),
    ("fitting", FeatureType::Fitting),
    ("flange", FeatureType::Fitting),
    ("tee", FeatureType::Fitting),
    ("dent", FeatureType::Dent),
    ("crack", FeatureType::Crack),
    ("gouge", FeatureType::Gouge),
    ("lamination", FeatureType::Lamination),
    ("manufactur", FeatureType::ManufacturingDefect),
    ("mill defect", FeatureType::ManufacturingDefect),
    ("external metal loss", FeatureType::ExternalMetalLoss),
    ("external corrosion", FeatureType::ExternalMetalLoss),
    ("internal metal loss", FeatureType::InternalMetalLoss),
    ("internal corrosion", FeatureType::InternalMetalLoss),
    ("metal loss", FeatureType::MetalLoss),
    ("corrosion", FeatureType::MetalLoss),
];

fn clock_regex() -> &'static Regex {
    static CLOCK_RE: OnceLock<Regex> = OnceLock::new();
    CLOCK_RE.get_or_init(|| Regex::new(r"^\s*(\d{1,2}):([0-5]\d)\s*$").expect("valid clock regex"))
}

/// Map a raw feature description to its canonical type.
/// Unknown or empty strings map to [`FeatureType::Unknown`].
pub fn canonical_feature_type(raw: Option<&str>) -> FeatureType {
    let Some(raw) = raw else {
        return FeatureType::Unknown;
    };
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return FeatureType::Unknown;
    }
    for (needle, feature_type) in FEATURE_TYPE_TABLE {
        if normalized.contains(needle) {
            return *feature_type;
        }
    }
    FeatureType::Unknown
}

/// Parse a clock position into degrees in [0, 360).
///
/// Accepts `"H:MM"` (hours 0..12, minutes 0..59), decimal hours (values
/// ≤ 12), or degrees (values > 12). Returns None when the field is absent
/// or unparseable, which the caller treats as missing.
pub fn parse_clock(field: Option<&ClockField>) -> Option<f64> {
    let value = match field? {
        ClockField::Number(v) => *v,
        ClockField::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Some(captures) = clock_regex().captures(trimmed) {
                let hours: u32 = captures[1].parse().ok()?;
                let minutes: u32 = captures[2].parse().ok()?;
                if hours > 12 {
                    return None;
                }
                let degrees =
                    (f64::from(hours % 12) * 30.0 + f64::from(minutes) * 0.5).rem_euclid(360.0);
                return Some(degrees);
            }
            trimmed.parse::<f64>().ok()?
        }
    };

    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value <= 12.0 {
        // Decimal hours: 4.5 reads as 4:30
        Some((value.rem_euclid(12.0)) * 30.0 % 360.0)
    } else {
        Some(value.rem_euclid(360.0))
    }
}

/// Turn one run's raw rows into canonical anomalies, sorted by distance.
pub fn normalize_run(rows: &[RawRecord], run_index: usize) -> Vec<Anomaly> {
    let mut anomalies: Vec<Anomaly> = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| normalize_row(row, run_index, row_index))
        .collect();

    anomalies.sort_by(|a, b| a.raw_distance.total_cmp(&b.raw_distance));

    debug!(
        run_index,
        rows = anomalies.len(),
        flagged = anomalies.iter().filter(|a| a.has_missing_data).count(),
        "normalized run"
    );
    anomalies
}

fn normalize_row(row: &RawRecord, run_index: usize, row_index: usize) -> Anomaly {
    let distance = row.distance.filter(|v| v.is_finite());
    let depth = row.depth_percent.filter(|v| v.is_finite());
    let clock = parse_clock(row.clock_position.as_ref());
    let feature_type_missing = row
        .feature_type
        .as_deref()
        .map_or(true, |s| s.trim().is_empty());

    let has_missing_data =
        distance.is_none() || depth.is_none() || clock.is_none() || feature_type_missing;

    let raw_distance = distance.unwrap_or(0.0);
    let odometer = row
        .odometer
        .filter(|v| v.is_finite())
        .unwrap_or(raw_distance);

    Anomaly {
        id: AnomalyId::new(run_index, row_index),
        feature_id: row.feature_id.clone(),
        raw_distance,
        odometer,
        corrected_distance: raw_distance,
        joint_number: row.joint_number.map_or(0, |j| j.max(0) as u32),
        clock_degrees: clock.unwrap_or(0.0),
        feature_type: canonical_feature_type(row.feature_type.as_deref()),
        depth_percent: depth.unwrap_or(0.0).clamp(0.0, 100.0),
        length: row.length.filter(|v| v.is_finite()).unwrap_or(0.0).abs(),
        width: row.width.filter(|v| v.is_finite()).unwrap_or(0.0).abs(),
        wall_thickness: row
            .wall_thickness
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_WALL_THICKNESS_IN),
        cleaning_flags: Vec::new(),
        has_missing_data,
        extras: row.extras.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<ClockField> {
        Some(ClockField::Text(s.to_string()))
    }

    #[test]
    fn clock_hmm_converts_to_degrees() {
        assert_eq!(parse_clock(text("3:00").as_ref()), Some(90.0));
        assert_eq!(parse_clock(text("6:30").as_ref()), Some(195.0));
        // 12:00 is top dead centre
        assert_eq!(parse_clock(text("12:00").as_ref()), Some(0.0));
        assert_eq!(parse_clock(text("0:30").as_ref()), Some(15.0));
    }

    #[test]
    fn clock_decimal_hours_and_degrees() {
        // ≤ 12 reads as hours
        assert_eq!(parse_clock(Some(&ClockField::Number(4.5))), Some(135.0));
        assert_eq!(parse_clock(Some(&ClockField::Number(12.0))), Some(0.0));
        // > 12 reads as degrees
        assert_eq!(parse_clock(Some(&ClockField::Number(135.0))), Some(135.0));
        assert_eq!(parse_clock(Some(&ClockField::Number(370.0))), Some(10.0));
    }

    #[test]
    fn clock_numeric_strings_parse_like_numbers() {
        assert_eq!(parse_clock(text("4.5").as_ref()), Some(135.0));
        assert_eq!(parse_clock(text("350").as_ref()), Some(350.0));
    }

    #[test]
    fn clock_garbage_is_missing() {
        assert_eq!(parse_clock(None), None);
        assert_eq!(parse_clock(text("").as_ref()), None);
        assert_eq!(parse_clock(text("top of pipe").as_ref()), None);
        assert_eq!(parse_clock(text("13:30").as_ref()), None);
        assert_eq!(parse_clock(Some(&ClockField::Number(f64::NAN))), None);
        assert_eq!(parse_clock(Some(&ClockField::Number(-3.0))), None);
    }

    #[test]
    fn feature_table_distinguishes_weld_kinds() {
        assert_eq!(
            canonical_feature_type(Some("Girth Weld")),
            FeatureType::GirthWeld
        );
        assert_eq!(
            canonical_feature_type(Some("Seam Weld Anomaly")),
            FeatureType::SeamWeld
        );
        // A bare "weld" reads as girth
        assert_eq!(canonical_feature_type(Some("weld")), FeatureType::GirthWeld);
    }

    #[test]
    fn feature_table_maps_corrosion_family() {
        assert_eq!(
            canonical_feature_type(Some("External Corrosion")),
            FeatureType::ExternalMetalLoss
        );
        assert_eq!(
            canonical_feature_type(Some("internal metal loss cluster")),
            FeatureType::InternalMetalLoss
        );
        assert_eq!(
            canonical_feature_type(Some("Metal Loss")),
            FeatureType::MetalLoss
        );
        assert_eq!(
            canonical_feature_type(Some("corrosion cluster")),
            FeatureType::MetalLoss
        );
    }

    #[test]
    fn unknown_and_empty_types() {
        assert_eq!(canonical_feature_type(None), FeatureType::Unknown);
        assert_eq!(canonical_feature_type(Some("   ")), FeatureType::Unknown);
        assert_eq!(
            canonical_feature_type(Some("mystery object")),
            FeatureType::Unknown
        );
    }

    #[test]
    fn missing_numerics_get_defaults() {
        let rows = vec![RawRecord {
            feature_type: Some("dent".to_string()),
            ..Default::default()
        }];
        let anomalies = normalize_run(&rows, 0);
        let a = &anomalies[0];

        assert_eq!(a.raw_distance, 0.0);
        assert_eq!(a.odometer, 0.0);
        assert_eq!(a.corrected_distance, 0.0);
        assert_eq!(a.wall_thickness, DEFAULT_WALL_THICKNESS_IN);
        assert_eq!(a.joint_number, 0);
        assert_eq!(a.clock_degrees, 0.0);
        assert!(a.has_missing_data, "missing distance must set the flag");
    }

    #[test]
    fn odometer_defaults_to_distance() {
        let rows = vec![RawRecord {
            distance: Some(1234.5),
            depth_percent: Some(10.0),
            clock_position: Some(ClockField::Number(90.0)),
            feature_type: Some("metal loss".to_string()),
            ..Default::default()
        }];
        let anomalies = normalize_run(&rows, 0);
        assert_eq!(anomalies[0].odometer, 1234.5);
        assert!(!anomalies[0].has_missing_data);
    }

    #[test]
    fn depth_clamped_dimensions_absolute() {
        let rows = vec![RawRecord {
            distance: Some(10.0),
            depth_percent: Some(150.0),
            length: Some(-4.0),
            width: Some(-2.0),
            clock_position: Some(ClockField::Number(0.0)),
            feature_type: Some("metal loss".to_string()),
            ..Default::default()
        }];
        let anomalies = normalize_run(&rows, 0);
        assert_eq!(anomalies[0].depth_percent, 100.0);
        assert_eq!(anomalies[0].length, 4.0);
        assert_eq!(anomalies[0].width, 2.0);
    }

    #[test]
    fn output_sorted_by_distance_with_stable_ids() {
        let rows = vec![
            RawRecord {
                distance: Some(500.0),
                ..Default::default()
            },
            RawRecord {
                distance: Some(100.0),
                ..Default::default()
            },
            RawRecord {
                distance: Some(300.0),
                ..Default::default()
            },
        ];
        let anomalies = normalize_run(&rows, 2);
        let distances: Vec<f64> = anomalies.iter().map(|a| a.raw_distance).collect();
        assert_eq!(distances, vec![100.0, 300.0, 500.0]);
        // Ids still point at the original row positions
        assert_eq!(anomalies[0].id, AnomalyId::new(2, 1));
        assert_eq!(anomalies[2].id, AnomalyId::new(2, 0));
    }
}
