//! Heuristic currency extraction from gazette excerpts.
//!
//! Used by the comparison flow when the backend has not pre-aggregated
//! investment values. Matches Brazilian notation (`R$ 1.234,56`), filters
//! out implausible amounts, and only keeps matches that sit near a
//! technology-education keyword. False positives and negatives are expected;
//! this does not try to match backend-side analysis precision.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::date_utils::month_key;
use crate::error::{AppError, AppResult};
use crate::models::Gazette;

/// Amounts outside this range are treated as OCR noise or unrelated numbers.
const MIN_PLAUSIBLE: f64 = 100.0;
const MAX_PLAUSIBLE: f64 = 100_000_000.0;

/// Characters inspected on each side of a match for a contextual keyword.
const CONTEXT_WINDOW: usize = 500;

/// Keywords that mark an amount as related to technology in education.
const CONTEXT_KEYWORDS: &[&str] = &[
    "software",
    "robótica",
    "robotica",
    "aplicativo",
    "tecnologia",
    "educacional",
    "informática",
];

pub struct MonetaryExtractor {
    amount: Regex,
    keyword: Regex,
}

impl MonetaryExtractor {
    pub fn new() -> AppResult<Self> {
        // `R$ 1.234,56`: dot-separated thousands, comma decimals, both
        // groups optional so `R$ 500` and `R$ 50,00` also match.
        let amount = Regex::new(r"R\$\s*((?:\d{1,3}(?:\.\d{3})+|\d+)(?:,\d{1,2})?)")
            .map_err(|e| AppError::Internal(format!("invalid amount pattern: {}", e)))?;

        let keyword = RegexBuilder::new(&CONTEXT_KEYWORDS.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::Internal(format!("invalid keyword pattern: {}", e)))?;

        Ok(Self { amount, keyword })
    }

    /// Sum of all plausible, keyword-adjacent amounts found in `text`.
    pub fn extract_total(&self, text: &str) -> f64 {
        let mut total = 0.0;

        for captures in self.amount.captures_iter(text) {
            let (Some(matched), Some(raw)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            let Some(value) = parse_brl_number(raw.as_str()) else {
                continue;
            };
            if !(MIN_PLAUSIBLE..=MAX_PLAUSIBLE).contains(&value) {
                continue;
            }
            if !self.has_context(text, matched.start(), matched.end()) {
                continue;
            }
            total += value;
        }

        total
    }

    /// Monthly investment map for a set of gazettes, built from their
    /// excerpts. Records with unparsable dates or no retained amounts
    /// contribute nothing.
    pub fn monthly_investments(&self, gazettes: &[Gazette]) -> HashMap<String, f64> {
        let mut by_month: HashMap<String, f64> = HashMap::new();

        for gazette in gazettes {
            let Some(month) = month_key(&gazette.date) else {
                tracing::debug!(date = %gazette.date, "skipping gazette with unparsable date");
                continue;
            };

            let record_total: f64 = gazette
                .excerpts
                .iter()
                .map(|excerpt| self.extract_total(excerpt))
                .sum();

            if record_total > 0.0 {
                *by_month.entry(month).or_insert(0.0) += record_total;
            }
        }

        by_month
    }

    /// True when a window of `CONTEXT_WINDOW` characters on either side of
    /// the match contains at least one contextual keyword.
    fn has_context(&self, text: &str, match_start: usize, match_end: usize) -> bool {
        let prefix = &text[..match_start];
        let window_start = prefix
            .char_indices()
            .rev()
            .nth(CONTEXT_WINDOW - 1)
            .map(|(i, _)| i)
            .unwrap_or(0);

        let suffix = &text[match_end..];
        let window_end = suffix
            .char_indices()
            .nth(CONTEXT_WINDOW)
            .map(|(i, _)| match_end + i)
            .unwrap_or(text.len());

        self.keyword.is_match(&text[window_start..window_end])
    }
}

/// Parses `1.234,56` into `1234.56`.
fn parse_brl_number(raw: &str) -> Option<f64> {
    let normalized = raw.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}
