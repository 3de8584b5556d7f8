//! Shared primitive types used across the dashboard.

use crate::error::{DashboardError, DashboardResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for every serialized date (week keys, override keys).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A grants-office analyst.
///
/// `full_name` is the canonical "Last, First" form found in the proposal
/// export; `display_name` is the short form used in charts, the directory
/// and override keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Analyst {
    pub full_name:    String,
    pub display_name: String,
}

impl Analyst {
    pub fn from_full_name(full_name: &str) -> Self {
        let full_name = full_name.trim().to_string();
        let display_name = display_name_for(&full_name);
        Self { full_name, display_name }
    }
}

impl fmt::Display for Analyst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// First whitespace-delimited token after the first comma.
/// Names without a comma (or with nothing after it) fall back to their
/// first token.
pub fn display_name_for(full_name: &str) -> String {
    let after_comma = full_name
        .split_once(',')
        .map(|(_, rest)| rest)
        .and_then(|rest| rest.split_whitespace().next());
    after_comma
        .or_else(|| full_name.split_whitespace().next())
        .unwrap_or("")
        .to_string()
}

/// The Monday that starts the ISO week containing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        WeekKey(date - Duration::days(offset))
    }

    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    pub fn parse(value: &str) -> DashboardResult<Self> {
        Ok(Self::of(parse_date(value)?))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

pub fn parse_date(value: &str) -> DashboardResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DashboardError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Statuses that take a record out of the active workload.
pub const EXCLUDED_STATUSES: [&str; 5] = [
    "Award Received",
    "Post-award Intake",
    "Declined",
    "Turned Away",
    "Withdrawn",
];

/// One grants proposal, already cleaned by the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub record_number: String,
    pub owner:         String,
    pub analyst:       String,
    pub deadline:      NaiveDate,
    pub status:        String,
}

impl ProposalRecord {
    /// Whether this record participates in workload counts.
    pub fn is_counted(&self) -> bool {
        !self.analyst.trim().is_empty() && !EXCLUDED_STATUSES.contains(&self.status.as_str())
    }

    pub fn week(&self) -> WeekKey {
        WeekKey::of(self.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn display_name_is_first_token_after_comma() {
        assert_eq!(display_name_for("Okafor, Tyler James"), "Tyler");
        assert_eq!(display_name_for("Villanueva,  Anxo"), "Anxo");
        assert_eq!(display_name_for("Prince"), "Prince");
        assert_eq!(display_name_for("Solo,"), "Solo,");
    }

    #[test]
    fn week_key_is_monday_and_idempotent() {
        let mut date = d(2024, 12, 28);
        for _ in 0..400 {
            let week = WeekKey::of(date);
            assert_eq!(week.monday().weekday(), Weekday::Mon);
            assert_eq!(WeekKey::of(week.monday()), week);
            assert!(week.monday() <= date);
            assert!((date - week.monday()).num_days() < 7);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn week_key_crosses_year_boundary() {
        // 2025-01-01 is a Wednesday.
        assert_eq!(WeekKey::of(d(2025, 1, 1)).monday(), d(2024, 12, 30));
        assert_eq!(WeekKey::parse("2025-01-12").unwrap().to_string(), "2025-01-06");
    }

    #[test]
    fn excluded_status_is_not_counted() {
        let mut record = ProposalRecord {
            record_number: "FP-1".into(),
            owner:         "Dr. Reyes".into(),
            analyst:       "Okafor, Tyler".into(),
            deadline:      d(2025, 3, 5),
            status:        "In Development".into(),
        };
        assert!(record.is_counted());
        record.status = "Withdrawn".into();
        assert!(!record.is_counted());
        record.status = "Submitted".into();
        record.analyst = "   ".into();
        assert!(!record.is_counted());
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(matches!(
            parse_date("2025-13-01"),
            Err(DashboardError::InvalidDate { .. })
        ));
    }
}
