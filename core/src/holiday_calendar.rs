//! Institutional holiday calendar.
//!
//! The list is explicitly enumerated for calendar years 2024–2026. Dates
//! outside those years are treated as ordinary days: `is_holiday` returns
//! false and `covers` lets callers notice the gap. Extend `HOLIDAYS` when the
//! institution publishes a new calendar; never infer holidays by rule.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// (year, month, day) of every non-working campus day.
const HOLIDAYS: &[(i32, u32, u32)] = &[
    // 2024
    (2024, 1, 1),   // New Year's Day
    (2024, 1, 15),  // Martin Luther King Jr. Day
    (2024, 3, 29),  // Cesar Chavez Day (observed)
    (2024, 5, 27),  // Memorial Day
    (2024, 6, 19),  // Juneteenth
    (2024, 7, 4),   // Independence Day
    (2024, 9, 2),   // Labor Day
    (2024, 11, 11), // Veterans Day
    (2024, 11, 28), // Thanksgiving
    (2024, 11, 29),
    (2024, 12, 24), // Winter closure
    (2024, 12, 25),
    (2024, 12, 31),
    // 2025
    (2025, 1, 1),
    (2025, 1, 20),
    (2025, 3, 31),
    (2025, 5, 26),
    (2025, 6, 19),
    (2025, 7, 4),
    (2025, 9, 1),
    (2025, 11, 11),
    (2025, 11, 27),
    (2025, 11, 28),
    (2025, 12, 24),
    (2025, 12, 25),
    (2025, 12, 31),
    // 2026
    (2026, 1, 1),
    (2026, 1, 19),
    (2026, 3, 31),
    (2026, 5, 25),
    (2026, 6, 19),
    (2026, 7, 3), // Independence Day (observed)
    (2026, 9, 7),
    (2026, 11, 11),
    (2026, 11, 26),
    (2026, 11, 27),
    (2026, 12, 24),
    (2026, 12, 25),
    (2026, 12, 31),
];

#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    dates:      BTreeSet<NaiveDate>,
    first_year: i32,
    last_year:  i32,
}

impl HolidayCalendar {
    /// The enumerated institutional calendar.
    pub fn institutional() -> Self {
        Self::from_dates(
            HOLIDAYS
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        )
    }

    /// Build a calendar from an explicit date list. Coverage spans the years
    /// of the earliest and latest dates given.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let first_year = dates.iter().next().map(|d| d.year()).unwrap_or(0);
        let last_year = dates.iter().next_back().map(|d| d.year()).unwrap_or(-1);
        Self { dates, first_year, last_year }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Whether `date` falls in a year this calendar enumerates.
    pub fn covers(&self, date: NaiveDate) -> bool {
        (self.first_year..=self.last_year).contains(&date.year())
    }

    pub fn holidays(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::institutional()
    }
}
