//! Per-analyst workload table handed to the presentation layer.

use crate::{
    ledger::ProposalLedger,
    override_store::WorkloadOverrideStore,
    types::{Analyst, WeekKey},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar colour for a weekly count. Fixed thresholds, independent of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Green,
    Yellow,
    Red,
}

impl ColorBand {
    pub fn for_count(count: usize) -> Self {
        match count {
            0..=2 => ColorBand::Green,
            3     => ColorBand::Yellow,
            _     => ColorBand::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorBand::Green  => "green",
            ColorBand::Yellow => "yellow",
            ColorBand::Red    => "red",
        }
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRow {
    pub analyst:    Analyst,
    pub count:      usize,
    pub capacity:   u32,
    pub percentage: i32,
    pub band:       ColorBand,
    /// `"<record number>: <owner>"` for hover/detail display.
    pub proposals:  Vec<String>,
}

impl WorkloadRow {
    pub fn over_capacity(&self) -> bool {
        self.count > self.capacity as usize
    }
}

/// One row per rostered analyst, in roster order.
pub fn workload_table(
    roster:    &[Analyst],
    ledger:    &ProposalLedger,
    overrides: &WorkloadOverrideStore,
    week:      WeekKey,
) -> Vec<WorkloadRow> {
    let mut details = ledger.proposals_for_week(week);
    ledger
        .roster_counts(roster, week)
        .into_iter()
        .map(|(analyst, count)| WorkloadRow {
            capacity:   overrides.capacity_for(&analyst.display_name, week),
            percentage: overrides.percentage_for(&analyst.display_name, week),
            band:       ColorBand::for_count(count),
            proposals:  details.remove(&analyst.full_name).unwrap_or_default(),
            count,
            analyst,
        })
        .collect()
}
