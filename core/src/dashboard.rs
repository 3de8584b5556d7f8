//! The dashboard: explicit application state for one session.
//!
//! Owns the roster, the department directory, the current proposal
//! ledger and the override store. Every query borrows this state and
//! computes its answer fresh; only `set_override` and `load_records` change
//! anything.
//!
//! RULES:
//!   - The override store is the only component with durable state.
//!   - Replacing the ledger never touches overrides, and vice versa.

use crate::{
    business_days::{classify_notification, notification_date, NotificationStatus},
    config::DashboardConfig,
    department_directory::{group, DepartmentCategory, DepartmentDirectory},
    error::{DashboardError, DashboardResult},
    holiday_calendar::HolidayCalendar,
    ledger::ProposalLedger,
    override_store::{WorkloadOverride, WorkloadOverrideStore},
    recommender::{AssignmentDecision, AssignmentRecommender},
    store::DashboardStore,
    types::{Analyst, ProposalRecord, WeekKey},
    workload::{workload_table, WorkloadRow},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Notification deadline for a proposal and where it stands today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub deadline:          NaiveDate,
    pub notification_date: NaiveDate,
    pub status:            NotificationStatus,
}

pub struct Dashboard {
    roster:    Vec<Analyst>,
    directory: DepartmentDirectory,
    calendar:  HolidayCalendar,
    ledger:    ProposalLedger,
    overrides: WorkloadOverrideStore,
}

impl Dashboard {
    /// Wire a dashboard from validated config and an already migrated store.
    pub fn build(config: DashboardConfig, store: DashboardStore) -> DashboardResult<Self> {
        config.validate()?;
        let directory = DepartmentDirectory::from_config(&config)?;
        let overrides = WorkloadOverrideStore::load(store)?;
        Ok(Self {
            roster: config.roster(),
            directory,
            calendar: HolidayCalendar::institutional(),
            ledger: ProposalLedger::default(),
            overrides,
        })
    }

    /// Test dashboard: built-in config, fresh in-memory store.
    pub fn build_test() -> DashboardResult<Self> {
        let store = DashboardStore::in_memory()?;
        store.migrate()?;
        Self::build(DashboardConfig::default_test(), store)
    }

    /// Replace the current proposal set.
    pub fn load_records(&mut self, records: Vec<ProposalRecord>) {
        self.ledger = ProposalLedger::new(records);
    }

    pub fn roster(&self) -> &[Analyst] {
        &self.roster
    }

    pub fn directory(&self) -> &DepartmentDirectory {
        &self.directory
    }

    pub fn ledger(&self) -> &ProposalLedger {
        &self.ledger
    }

    pub fn overrides(&self) -> &WorkloadOverrideStore {
        &self.overrides
    }

    /// Roster analyst by display name.
    pub fn analyst(&self, display_name: &str) -> DashboardResult<&Analyst> {
        self.roster
            .iter()
            .find(|a| a.display_name == display_name)
            .ok_or_else(|| DashboardError::UnknownAnalyst { name: display_name.to_string() })
    }

    pub fn workload(&self, week: WeekKey) -> Vec<WorkloadRow> {
        workload_table(&self.roster, &self.ledger, &self.overrides, week)
    }

    /// Recommend an analyst for a new proposal due on `deadline`.
    pub fn recommend(&self, department: &str, deadline: NaiveDate) -> AssignmentDecision {
        self.recommend_for_week(department, WeekKey::of(deadline))
    }

    pub fn recommend_for_week(&self, department: &str, week: WeekKey) -> AssignmentDecision {
        AssignmentRecommender::new(&self.directory, &self.ledger, &self.overrides)
            .recommend(department, week)
    }

    pub fn notification(&self, deadline: NaiveDate, today: NaiveDate) -> Notification {
        let date = notification_date(&self.calendar, deadline);
        Notification {
            deadline,
            notification_date: date,
            status: classify_notification(date, today),
        }
    }

    /// Record a capacity override for a rostered analyst. `date` may be any
    /// day of the target week.
    pub fn set_override(
        &mut self,
        analyst:    &str,
        date:       NaiveDate,
        percentage: i32,
        reasoning:  &str,
    ) -> DashboardResult<()> {
        let display = self.analyst(analyst)?.display_name.clone();
        self.overrides.set(&display, WeekKey::of(date), percentage, reasoning)
    }

    pub fn get_override(&self, analyst: &str, date: NaiveDate) -> Option<&WorkloadOverride> {
        self.overrides.get(analyst, WeekKey::of(date))
    }

    pub fn grouped_departments(&self) -> Vec<(DepartmentCategory, Vec<String>)> {
        group(&self.directory.list_departments())
    }
}
