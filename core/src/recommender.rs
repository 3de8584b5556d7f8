//! Assignment recommendation.
//!
//! Given a department and a week, pick who should take a new proposal:
//!   1. the department's primary analyst, if under capacity;
//!   2. otherwise the backup analyst, if under capacity;
//!   3. otherwise nobody.
//!
//! Evaluated fresh on every call from the current ledger and overrides.
//! Nothing is cached and nothing is mutated.

use crate::{
    department_directory::DepartmentDirectory,
    ledger::ProposalLedger,
    override_store::WorkloadOverrideStore,
    types::{Analyst, WeekKey},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOutcome {
    AssignToPrimary,
    AssignToBackup,
    NoCapacity,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalystLoad {
    pub analyst: Analyst,
    pub current: usize,
    pub max:     u32,
}

impl AnalystLoad {
    pub fn has_room(&self) -> bool {
        self.current < self.max as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDecision {
    pub department: String,
    pub week:       WeekKey,
    pub outcome:    AssignmentOutcome,
    /// None only for `NoMatch`.
    pub primary:    Option<AnalystLoad>,
    pub backup:     Option<AnalystLoad>,
}

impl AssignmentDecision {
    /// The analyst who should take the proposal, if any.
    pub fn assignee(&self) -> Option<&Analyst> {
        match self.outcome {
            AssignmentOutcome::AssignToPrimary => self.primary.as_ref().map(|l| &l.analyst),
            AssignmentOutcome::AssignToBackup  => self.backup.as_ref().map(|l| &l.analyst),
            AssignmentOutcome::NoCapacity | AssignmentOutcome::NoMatch => None,
        }
    }
}

impl fmt::Display for AssignmentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (primary, backup) = match (&self.primary, &self.backup) {
            (Some(p), Some(b)) => (p, b),
            _ => {
                return write!(f, "No analyst found for department '{}'.", self.department);
            }
        };
        match self.outcome {
            AssignmentOutcome::AssignToPrimary => write!(
                f,
                "Assign to {}: {}/{} proposals for the week of {}.",
                primary.analyst, primary.current, primary.max, self.week
            ),
            AssignmentOutcome::AssignToBackup => write!(
                f,
                "{} is at capacity ({}/{}); assign to backup {}: {}/{} proposals for the week of {}.",
                primary.analyst, primary.current, primary.max,
                backup.analyst, backup.current, backup.max, self.week
            ),
            _ => write!(
                f,
                "Both {} ({}/{}) and backup {} ({}/{}) are at capacity for the week of {}.",
                primary.analyst, primary.current, primary.max,
                backup.analyst, backup.current, backup.max, self.week
            ),
        }
    }
}

pub struct AssignmentRecommender<'a> {
    directory: &'a DepartmentDirectory,
    ledger:    &'a ProposalLedger,
    overrides: &'a WorkloadOverrideStore,
}

impl<'a> AssignmentRecommender<'a> {
    pub fn new(
        directory: &'a DepartmentDirectory,
        ledger:    &'a ProposalLedger,
        overrides: &'a WorkloadOverrideStore,
    ) -> Self {
        Self { directory, ledger, overrides }
    }

    fn load_of(&self, analyst: &Analyst, week: WeekKey) -> AnalystLoad {
        AnalystLoad {
            analyst: analyst.clone(),
            current: self.ledger.count_for(analyst, week),
            max:     self.overrides.capacity_for(&analyst.display_name, week),
        }
    }

    pub fn recommend(&self, department: &str, week: WeekKey) -> AssignmentDecision {
        let Some(coverage) = self.directory.resolve(department) else {
            return AssignmentDecision {
                department: department.to_string(),
                week,
                outcome:    AssignmentOutcome::NoMatch,
                primary:    None,
                backup:     None,
            };
        };

        let primary = self.load_of(&coverage.primary, week);
        let backup = self.load_of(&coverage.backup, week);
        let outcome = decide(&primary, &backup);
        log::debug!(
            "recommend '{department}' week {week}: {} {}/{}, {} {}/{} -> {outcome:?}",
            primary.analyst, primary.current, primary.max,
            backup.analyst, backup.current, backup.max
        );

        AssignmentDecision {
            department: department.to_string(),
            week,
            outcome,
            primary: Some(primary),
            backup:  Some(backup),
        }
    }
}

/// The two-tier rule on already-computed loads.
pub fn decide(primary: &AnalystLoad, backup: &AnalystLoad) -> AssignmentOutcome {
    if primary.has_room() {
        AssignmentOutcome::AssignToPrimary
    } else if backup.has_room() {
        AssignmentOutcome::AssignToBackup
    } else {
        AssignmentOutcome::NoCapacity
    }
}
