//! Workload overrides: per-analyst, per-week capacity adjustments.
//!
//! The store owns the only mutable state in the dashboard: a map from
//! (analyst display name, week) to a capacity percentage and its reasoning.
//! Every entry is loaded at startup; `set` writes through to the database
//! before touching memory, so a failed write leaves both sides unchanged.

use crate::{
    error::{DashboardError, DashboardResult},
    store::DashboardStore,
    types::{parse_date, WeekKey},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Proposals an analyst carries in a week at 100% capacity.
pub const BASE_CAPACITY: u32 = 4;

/// Percentage used when no override exists.
pub const DEFAULT_PERCENTAGE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverrideKey {
    pub analyst: String,
    pub week:    WeekKey,
}

impl OverrideKey {
    pub fn new(analyst: &str, week: WeekKey) -> Self {
        Self { analyst: analyst.to_string(), week }
    }

    /// Storage form: `"<analyst>|<YYYY-MM-DD>"`.
    pub fn to_wire(&self) -> String {
        format!("{}|{}", self.analyst, self.week)
    }

    /// The week part must be the Monday itself. A key naming any other day
    /// is rejected so that two stored rows can never share one `OverrideKey`.
    pub fn from_wire(key: &str) -> DashboardResult<Self> {
        let invalid = || DashboardError::InvalidOverrideKey { key: key.to_string() };
        let (analyst, week) = key.rsplit_once('|').ok_or_else(invalid)?;
        if analyst.is_empty() {
            return Err(invalid());
        }
        let date = parse_date(week).map_err(|_| invalid())?;
        let week = WeekKey::of(date);
        if week.monday() != date {
            return Err(invalid());
        }
        Ok(Self::new(analyst, week))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadOverride {
    pub percentage: i32,
    pub reasoning:  String,
}

impl WorkloadOverride {
    pub fn capacity(&self) -> u32 {
        capacity_from_percentage(self.percentage)
    }
}

/// round(BASE_CAPACITY × percentage / 100), half rounding up.
///
/// Integer percentages never produce an exact .5 (4p/100 has a remainder of
/// 0, 4, 8, … in hundredths), so the rounding mode only matters for the
/// documented contract. Negative percentages give zero.
pub fn capacity_from_percentage(percentage: i32) -> u32 {
    let p = i64::from(percentage.max(0));
    let scaled = i64::from(BASE_CAPACITY) * p;
    ((scaled + 50) / 100) as u32
}

pub struct WorkloadOverrideStore {
    store:     DashboardStore,
    overrides: HashMap<OverrideKey, WorkloadOverride>,
}

impl WorkloadOverrideStore {
    /// Load every persisted override. Rows whose key does not parse are
    /// skipped with a warning; they stay on disk untouched.
    pub fn load(store: DashboardStore) -> DashboardResult<Self> {
        let mut overrides = HashMap::new();
        for row in store.all_overrides()? {
            match OverrideKey::from_wire(&row.key) {
                Ok(key) => {
                    overrides.insert(
                        key,
                        WorkloadOverride {
                            percentage: row.percentage,
                            reasoning:  row.reasoning,
                        },
                    );
                }
                Err(e) => log::warn!("skipping stored override: {e}"),
            }
        }
        log::info!("loaded {} workload override(s)", overrides.len());
        Ok(Self { store, overrides })
    }

    pub fn get(&self, analyst: &str, week: WeekKey) -> Option<&WorkloadOverride> {
        self.overrides.get(&OverrideKey::new(analyst, week))
    }

    /// Persist then apply. The percentage is stored as given; range checks
    /// belong to whoever collects it.
    pub fn set(
        &mut self,
        analyst:    &str,
        week:       WeekKey,
        percentage: i32,
        reasoning:  &str,
    ) -> DashboardResult<()> {
        let key = OverrideKey::new(analyst, week);
        self.store.upsert_override(&key.to_wire(), percentage, reasoning)?;
        log::info!("override {} set to {percentage}%", key.to_wire());
        self.overrides.insert(
            key,
            WorkloadOverride {
                percentage,
                reasoning: reasoning.to_string(),
            },
        );
        Ok(())
    }

    pub fn capacity_for(&self, analyst: &str, week: WeekKey) -> u32 {
        self.get(analyst, week)
            .map(WorkloadOverride::capacity)
            .unwrap_or(BASE_CAPACITY)
    }

    pub fn percentage_for(&self, analyst: &str, week: WeekKey) -> i32 {
        self.get(analyst, week)
            .map(|o| o.percentage)
            .unwrap_or(DEFAULT_PERCENTAGE)
    }

    /// All overrides for a week, sorted by analyst.
    pub fn for_week(&self, week: WeekKey) -> Vec<(&str, &WorkloadOverride)> {
        let mut entries: Vec<_> = self
            .overrides
            .iter()
            .filter(|(key, _)| key.week == week)
            .map(|(key, value)| (key.analyst.as_str(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rounds_half_up_from_percentage() {
        assert_eq!(capacity_from_percentage(0), 0);
        assert_eq!(capacity_from_percentage(50), 2);
        assert_eq!(capacity_from_percentage(100), 4);
        assert_eq!(capacity_from_percentage(150), 6);
        assert_eq!(capacity_from_percentage(37), 1); // 1.48
        assert_eq!(capacity_from_percentage(38), 2); // 1.52
        assert_eq!(capacity_from_percentage(13), 1); // 0.52
        assert_eq!(capacity_from_percentage(12), 0); // 0.48
    }

    #[test]
    fn out_of_range_percentages_stay_sane() {
        assert_eq!(capacity_from_percentage(-40), 0);
        assert_eq!(capacity_from_percentage(300), 12);
        assert_eq!(capacity_from_percentage(i32::MAX), 85_899_346);
    }

    #[test]
    fn wire_key_round_trips_and_rejects_garbage() {
        let week = WeekKey::parse("2025-01-06").unwrap();
        let key = OverrideKey::new("Tyler", week);
        assert_eq!(key.to_wire(), "Tyler|2025-01-06");
        assert_eq!(OverrideKey::from_wire("Tyler|2025-01-06").unwrap(), key);

        for bad in [
            "Tyler",
            "|2025-01-06",
            "Tyler|next week",
            "Tyler|2025-02-30",
            "Tyler|2025-01-08",
        ] {
            assert!(
                matches!(
                    OverrideKey::from_wire(bad),
                    Err(DashboardError::InvalidOverrideKey { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_rows_are_skipped_on_load() {
        let store = DashboardStore::in_memory().unwrap();
        store.migrate().unwrap();
        store.upsert_override("Tyler|2025-01-06", 50, "conference").unwrap();
        store.upsert_override("garbage", 10, "").unwrap();

        let overrides = WorkloadOverrideStore::load(store).unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.store().override_count().unwrap(), 2);
    }
}
