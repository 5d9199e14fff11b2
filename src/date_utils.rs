use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Granularity at which time-series values are bucketed for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodGrouping {
    Month,
    Year,
}

impl FromStr for PeriodGrouping {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(()),
        }
    }
}

impl PeriodGrouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Localized three-letter month abbreviations, indexed by month number - 1.
const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Chart label for a raw period key.
///
/// Month keys (`"2023-04"`) become `"Abr/23"`; year keys and anything that
/// does not parse as a month key are used as-is.
pub fn period_label(period: &str, grouping: PeriodGrouping) -> String {
    if grouping == PeriodGrouping::Month {
        if let Some((year, month)) = period.split_once('-') {
            let abbrev = month
                .parse::<usize>()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .map(|m| MONTH_ABBREV[m - 1]);
            if let Some(abbrev) = abbrev {
                let short_year = if year.len() == 4 { &year[2..] } else { year };
                return format!("{}/{}", abbrev, short_year);
            }
        }
    }
    period.to_string()
}

/// `"YYYY-MM"` bucket for an ISO date string (`"YYYY-MM-DD"`).
pub fn month_key(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.format("%Y-%m").to_string())
}

/// Checks a `start`/`end` pair used as a search window. Both bounds are
/// optional; when both are present the start must not come after the end.
pub fn check_date_order(start: Option<&str>, end: Option<&str>) -> AppResult<()> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(());
    };
    let from = parse_date(start)?;
    let to = parse_date(end)?;
    if from > to {
        return Err(AppError::Validation(
            "A data inicial deve ser anterior à data final.".into(),
        ));
    }
    Ok(())
}

fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Data inválida: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_use_pt_br_abbreviations() {
        assert_eq!(period_label("2023-04", PeriodGrouping::Month), "Abr/23");
        assert_eq!(period_label("2023-01", PeriodGrouping::Month), "Jan/23");
        assert_eq!(period_label("2024-12", PeriodGrouping::Month), "Dez/24");
    }

    #[test]
    fn year_keys_pass_through() {
        assert_eq!(period_label("2023", PeriodGrouping::Year), "2023");
    }

    #[test]
    fn malformed_month_key_passes_through() {
        assert_eq!(period_label("2023-13", PeriodGrouping::Month), "2023-13");
        assert_eq!(period_label("total", PeriodGrouping::Month), "total");
    }

    #[test]
    fn month_key_buckets_iso_dates() {
        assert_eq!(month_key("2023-04-17"), Some("2023-04".to_string()));
        assert_eq!(month_key("not-a-date"), None);
    }

    #[test]
    fn date_order_validation() {
        assert!(check_date_order(Some("2023-01-01"), Some("2023-06-30")).is_ok());
        assert!(check_date_order(None, Some("2023-06-30")).is_ok());
        assert!(check_date_order(Some("2023-07-01"), Some("2023-06-30")).is_err());
        assert!(check_date_order(Some("garbage"), Some("2023-06-30")).is_err());
    }

    #[test]
    fn grouping_round_trips() {
        assert_eq!("month".parse::<PeriodGrouping>(), Ok(PeriodGrouping::Month));
        assert_eq!("year".parse::<PeriodGrouping>(), Ok(PeriodGrouping::Year));
        assert!("week".parse::<PeriodGrouping>().is_err());
        assert_eq!(PeriodGrouping::Month.as_str(), "month");
    }
}
