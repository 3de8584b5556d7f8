//! Week-bucketed view of the proposal export.
//!
//! The ledger keeps only records that count toward workload (see
//! `ProposalRecord::is_counted`) and indexes them by the week of their
//! deadline. Analysts are keyed by the full name found in the export.

use crate::types::{Analyst, ProposalRecord, WeekKey};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct ProposalLedger {
    records: Vec<ProposalRecord>,
}

impl ProposalLedger {
    pub fn new(records: Vec<ProposalRecord>) -> Self {
        let total = records.len();
        let records: Vec<ProposalRecord> = records.into_iter().filter(|r| r.is_counted()).collect();
        log::debug!(
            "ledger built: {} counted, {} excluded by status or analyst",
            records.len(),
            total - records.len()
        );
        Self { records }
    }

    pub fn records(&self) -> &[ProposalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn in_week(&self, week: WeekKey) -> impl Iterator<Item = &ProposalRecord> {
        self.records.iter().filter(move |r| r.week() == week)
    }

    /// Proposal count per analyst for one week. Analysts with no proposals
    /// that week are absent; see `roster_counts` for the zero-filled view.
    pub fn counts_for_week(&self, week: WeekKey) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in self.in_week(week) {
            *counts.entry(record.analyst.trim().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// `"<record number>: <owner>"` lines per analyst, in export order.
    pub fn proposals_for_week(&self, week: WeekKey) -> BTreeMap<String, Vec<String>> {
        let mut details: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for record in self.in_week(week) {
            details
                .entry(record.analyst.trim().to_string())
                .or_default()
                .push(format!("{}: {}", record.record_number, record.owner));
        }
        details
    }

    /// Left join of the roster against a week's counts: every rostered
    /// analyst appears, in roster order, with 0 when they have nothing due.
    pub fn roster_counts(&self, roster: &[Analyst], week: WeekKey) -> Vec<(Analyst, usize)> {
        let counts = self.counts_for_week(week);
        for name in counts.keys() {
            if !roster.iter().any(|a| &a.full_name == name) {
                log::debug!("week {week}: '{name}' has proposals but is not on the roster");
            }
        }
        roster
            .iter()
            .map(|analyst| {
                let count = counts.get(&analyst.full_name).copied().unwrap_or(0);
                (analyst.clone(), count)
            })
            .collect()
    }

    pub fn count_for(&self, analyst: &Analyst, week: WeekKey) -> usize {
        self.in_week(week)
            .filter(|r| r.analyst.trim() == analyst.full_name)
            .count()
    }

    /// Weeks with at least one counted proposal, ascending.
    pub fn weeks(&self) -> Vec<WeekKey> {
        let weeks: BTreeSet<WeekKey> = self.records.iter().map(|r| r.week()).collect();
        weeks.into_iter().collect()
    }

    pub fn is_week_empty(&self, week: WeekKey) -> bool {
        self.in_week(week).next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(number: &str, analyst: &str, deadline: (i32, u32, u32), status: &str) -> ProposalRecord {
        ProposalRecord {
            record_number: number.into(),
            owner:         format!("Owner {number}"),
            analyst:       analyst.into(),
            deadline:      NaiveDate::from_ymd_opt(deadline.0, deadline.1, deadline.2).unwrap(),
            status:        status.into(),
        }
    }

    fn week(date: &str) -> WeekKey {
        WeekKey::parse(date).unwrap()
    }

    #[test]
    fn counts_only_active_records_in_the_week() {
        let ledger = ProposalLedger::new(vec![
            record("A1", "Okafor, Tyler", (2025, 3, 3), "In Development"),
            record("A2", "Okafor, Tyler", (2025, 3, 9), "Submitted"),
            record("A3", "Okafor, Tyler", (2025, 3, 5), "Declined"),
            record("A4", "Villanueva, Anxo", (2025, 3, 7), "In Development"),
            record("A5", "Villanueva, Anxo", (2025, 3, 10), "In Development"),
        ]);

        let counts = ledger.counts_for_week(week("2025-03-05"));
        assert_eq!(counts.get("Okafor, Tyler"), Some(&2));
        assert_eq!(counts.get("Villanueva, Anxo"), Some(&1));
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn proposal_details_use_number_and_owner() {
        let ledger = ProposalLedger::new(vec![
            record("FP-10", "Okafor, Tyler", (2025, 3, 4), "Submitted"),
            record("FP-11", "Okafor, Tyler", (2025, 3, 6), "Submitted"),
        ]);
        let details = ledger.proposals_for_week(week("2025-03-03"));
        assert_eq!(
            details["Okafor, Tyler"],
            vec!["FP-10: Owner FP-10".to_string(), "FP-11: Owner FP-11".to_string()]
        );
    }

    #[test]
    fn roster_join_keeps_idle_analysts() {
        let roster = vec![
            Analyst::from_full_name("Okafor, Tyler"),
            Analyst::from_full_name("Villanueva, Anxo"),
        ];
        let ledger = ProposalLedger::new(vec![
            record("A1", "Okafor, Tyler", (2025, 3, 3), "Submitted"),
            record("A2", "Somebody, Else", (2025, 3, 3), "Submitted"),
        ]);
        let joined = ledger.roster_counts(&roster, week("2025-03-03"));
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].0.display_name, "Tyler");
        assert_eq!(joined[0].1, 1);
        assert_eq!(joined[1].0.display_name, "Anxo");
        assert_eq!(joined[1].1, 0);
    }

    #[test]
    fn weeks_are_distinct_and_sorted() {
        let ledger = ProposalLedger::new(vec![
            record("A1", "Okafor, Tyler", (2025, 3, 12), "Submitted"),
            record("A2", "Okafor, Tyler", (2025, 3, 3), "Submitted"),
            record("A3", "Okafor, Tyler", (2025, 3, 4), "Submitted"),
        ]);
        assert_eq!(ledger.weeks(), vec![week("2025-03-03"), week("2025-03-10")]);
        assert!(ledger.is_week_empty(week("2025-03-17")));
    }
}
