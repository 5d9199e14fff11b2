//! Period series building for bar and line charts.
//!
//! Converts a period → value map into an ordered, labeled sequence with a
//! visibility floor applied so small-but-nonzero bars stay distinguishable
//! from zero.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::date_utils::{period_label, PeriodGrouping};

/// Fraction of the series maximum below which positive values are raised
/// for display.
pub const VISIBILITY_FLOOR_RATIO: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Raw period key (`YYYY-MM` or `YYYY`); unique within a series.
    pub period: String,
    /// Chart label (`Abr/23` for month grouping).
    pub label: String,
    /// True value, shown in tooltips.
    pub value: f64,
    /// Rendered value; equals `value` except where the floor applied.
    pub display_value: f64,
}

/// Builds an ordered series from a period → value map.
///
/// Points are sorted ascending by the raw period key; lexical order is
/// chronological for zero-padded keys. The visibility floor is applied
/// against the maximum of this series.
pub fn build_series(values: &HashMap<String, f64>, grouping: PeriodGrouping) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = values
        .iter()
        .map(|(period, value)| SeriesPoint {
            period: period.clone(),
            label: period_label(period, grouping),
            value: *value,
            display_value: *value,
        })
        .collect();

    points.sort_by(|a, b| a.period.cmp(&b.period));

    let max = series_max(&points);
    apply_visibility_floor(&mut points, max);
    points
}

/// Merges two period maps for a side-by-side comparison.
///
/// The key set is the union of both sides, missing keys default to zero,
/// and the floor is applied independently per side using the combined
/// maximum so both charts share a scale.
pub fn merge_series(
    left: &HashMap<String, f64>,
    right: &HashMap<String, f64>,
    grouping: PeriodGrouping,
) -> (Vec<SeriesPoint>, Vec<SeriesPoint>) {
    let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();

    let point_for = |values: &HashMap<String, f64>, period: &str| {
        let value = values.get(period).copied().unwrap_or(0.0);
        SeriesPoint {
            period: period.to_string(),
            label: period_label(period, grouping),
            value,
            display_value: value,
        }
    };

    let mut left_points: Vec<SeriesPoint> = keys.iter().map(|k| point_for(left, k.as_str())).collect();
    let mut right_points: Vec<SeriesPoint> = keys.iter().map(|k| point_for(right, k.as_str())).collect();

    let combined_max = series_max(&left_points).max(series_max(&right_points));
    apply_visibility_floor(&mut left_points, combined_max);
    apply_visibility_floor(&mut right_points, combined_max);

    (left_points, right_points)
}

/// Raises `display_value` of strictly positive points below
/// `VISIBILITY_FLOOR_RATIO * max` to that floor. Zeros stay zero and the
/// true `value` field is never touched, so re-applying with the same max is
/// a no-op.
pub fn apply_visibility_floor(points: &mut [SeriesPoint], max: f64) {
    if max <= 0.0 {
        return;
    }
    let floor = max * VISIBILITY_FLOOR_RATIO;
    for point in points {
        if point.display_value > 0.0 && point.display_value < floor {
            point.display_value = floor;
        }
    }
}

fn series_max(points: &[SeriesPoint]) -> f64 {
    points.iter().fold(0.0, |acc, p| acc.max(p.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn series_is_sorted_and_labeled() {
        let input = values(&[
            ("2023-03", 50_000.0),
            ("2023-01", 100.0),
            ("2023-02", 0.0),
        ]);

        let series = build_series(&input, PeriodGrouping::Month);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan/23", "Fev/23", "Mar/23"]);
        assert!(series.windows(2).all(|w| w[0].period <= w[1].period));
    }

    #[test]
    fn floor_raises_small_values_and_keeps_tooltip_value() {
        let input = values(&[
            ("2023-01", 100.0),
            ("2023-02", 0.0),
            ("2023-03", 50_000.0),
        ]);

        let series = build_series(&input, PeriodGrouping::Month);
        // max = 50000 so the floor is 2500; 100 < 2500 gets raised.
        assert_eq!(series[0].value, 100.0);
        assert_eq!(series[0].display_value, 2_500.0);
        // Zero stays zero.
        assert_eq!(series[1].display_value, 0.0);
        // The maximum itself is untouched.
        assert_eq!(series[2].display_value, 50_000.0);
    }

    #[test]
    fn floor_is_idempotent_for_a_fixed_max() {
        let input = values(&[("2023-01", 100.0), ("2023-03", 50_000.0)]);
        let mut series = build_series(&input, PeriodGrouping::Month);
        let once = series.clone();
        apply_visibility_floor(&mut series, 50_000.0);
        assert_eq!(series, once, "re-flooring must not drift");
    }

    #[test]
    fn values_at_or_above_floor_untouched_exactly() {
        let input = values(&[("2023-01", 2_500.0), ("2023-02", 50_000.0)]);
        let series = build_series(&input, PeriodGrouping::Month);
        assert_eq!(series[0].display_value, 2_500.0);
    }

    #[test]
    fn all_zero_series_has_no_floor() {
        let input = values(&[("2023-01", 0.0), ("2023-02", 0.0)]);
        let series = build_series(&input, PeriodGrouping::Month);
        assert!(series.iter().all(|p| p.display_value == 0.0));
    }

    #[test]
    fn year_grouping_uses_raw_keys_as_labels() {
        let input = values(&[("2022", 10.0), ("2023", 20.0)]);
        let series = build_series(&input, PeriodGrouping::Year);
        assert_eq!(series[0].label, "2022");
        assert_eq!(series[1].label, "2023");
    }

    #[test]
    fn merge_unions_keys_and_shares_the_max() {
        let left = values(&[("2023-01", 40_000.0), ("2023-02", 100.0)]);
        let right = values(&[("2023-02", 300.0), ("2023-03", 1_000.0)]);

        let (l, r) = merge_series(&left, &right, PeriodGrouping::Month);

        let periods: Vec<&str> = l.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-01", "2023-02", "2023-03"]);
        assert_eq!(
            r.iter().map(|p| p.period.as_str()).collect::<Vec<_>>(),
            periods
        );

        // Missing keys default to zero and are not floored.
        assert_eq!(l[2].value, 0.0);
        assert_eq!(l[2].display_value, 0.0);
        assert_eq!(r[0].value, 0.0);

        // Combined max is 40000, floor 2000: both sides' small values rise.
        assert_eq!(l[1].display_value, 2_000.0);
        assert_eq!(l[1].value, 100.0);
        assert_eq!(r[1].display_value, 2_000.0);
        assert_eq!(r[2].display_value, 2_000.0);
        assert_eq!(l[0].display_value, 40_000.0);
    }
}
