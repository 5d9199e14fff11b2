//! Category aggregation for pie charts and ranking podiums.

use std::collections::HashMap;

use serde::Serialize;

/// The catch-all bucket excluded from category breakdowns.
const OTHER_BUCKET: &str = "Outros";

/// Maximum slice count for the pie chart.
pub const PIE_LIMIT: usize = 6;

/// Maximum entries on the ranking podium display.
pub const PODIUM_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    /// Share of the retained total, rounded to the nearest integer.
    pub percentage: u32,
}

/// Reduces a category → value map into a sorted top-N breakdown.
///
/// Non-positive values and the "Outros" bucket are dropped before the total
/// is computed, so percentages refer to the retained categories only. An
/// all-zero input yields an empty list (the pie chart renders its empty
/// state instead of dividing by zero).
pub fn aggregate_categories(categories: &HashMap<String, f64>, limit: usize) -> Vec<CategorySlice> {
    let retained: Vec<(&str, f64)> = categories
        .iter()
        .filter(|(name, value)| **value > 0.0 && name.as_str() != OTHER_BUCKET)
        .map(|(name, value)| (name.as_str(), *value))
        .collect();

    let total: f64 = retained.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut slices: Vec<CategorySlice> = retained
        .into_iter()
        .map(|(name, value)| CategorySlice {
            name: name.to_string(),
            value,
            percentage: (value / total * 100.0).round() as u32,
        })
        .collect();

    // Descending by value; name as tie-break so output is deterministic.
    slices.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    slices.truncate(limit);
    slices
}

/// Sum of the values that survive the aggregation filter.
pub fn retained_total(categories: &HashMap<String, f64>) -> f64 {
    categories
        .iter()
        .filter(|(name, value)| **value > 0.0 && name.as_str() != OTHER_BUCKET)
        .map(|(_, value)| value)
        .sum()
}
