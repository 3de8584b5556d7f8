//! Assignment recommendation tests.
//!
//! Tests cover: the two-tier primary/backup rule against real ledger counts,
//! capacity overrides feeding the rule, and unresolvable departments.

use chrono::NaiveDate;
use workload_core::{
    dashboard::Dashboard,
    recommender::AssignmentOutcome,
    types::{ProposalRecord, WeekKey},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const CSSE: &str = "Computer Science & Software Engineering";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// `n` active proposals for `analyst`, all due on `deadline`.
fn proposals(analyst: &str, n: usize, deadline: &str) -> Vec<ProposalRecord> {
    (0..n)
        .map(|i| ProposalRecord {
            record_number: format!("{analyst}-{i}"),
            owner:         format!("PI {i}"),
            analyst:       analyst.to_string(),
            deadline:      date(deadline),
            status:        "In Development".into(),
        })
        .collect()
}

fn dashboard_with(tyler: usize, anxo: usize) -> Dashboard {
    let mut dashboard = Dashboard::build_test().expect("build test dashboard");
    let mut records = proposals("Okafor, Tyler", tyler, "2025-03-05");
    records.extend(proposals("Villanueva, Anxo", anxo, "2025-03-06"));
    dashboard.load_records(records);
    dashboard
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Tyler at 3/4 still has room, so he takes the proposal.
#[test]
fn primary_with_room_is_recommended() {
    let dashboard = dashboard_with(3, 0);
    let decision = dashboard.recommend(CSSE, date("2025-03-07"));

    assert_eq!(decision.outcome, AssignmentOutcome::AssignToPrimary);
    let primary = decision.primary.as_ref().unwrap();
    assert_eq!(primary.analyst.display_name, "Tyler");
    assert_eq!((primary.current, primary.max), (3, 4));
    assert_eq!(decision.backup.as_ref().unwrap().analyst.display_name, "Anxo");
    assert_eq!(decision.assignee().map(|a| a.display_name.as_str()), Some("Tyler"));
}

/// Tyler full at 4/4, Anxo at 2/4: the backup takes it.
#[test]
fn full_primary_falls_back_to_backup() {
    let dashboard = dashboard_with(4, 2);
    let decision = dashboard.recommend(CSSE, date("2025-03-03"));

    assert_eq!(decision.outcome, AssignmentOutcome::AssignToBackup);
    let backup = decision.backup.as_ref().unwrap();
    assert_eq!((backup.current, backup.max), (2, 4));
    assert_eq!(decision.assignee().map(|a| a.display_name.as_str()), Some("Anxo"));
    assert!(decision.to_string().contains("assign to backup Anxo"));
}

/// Both at capacity is a valid terminal outcome, not an error.
#[test]
fn both_full_means_no_capacity() {
    let dashboard = dashboard_with(4, 4);
    let decision = dashboard.recommend(CSSE, date("2025-03-05"));

    assert_eq!(decision.outcome, AssignmentOutcome::NoCapacity);
    assert_eq!(decision.assignee(), None);
}

/// Counts are per week: the same analysts are free the following week.
#[test]
fn other_weeks_do_not_count() {
    let dashboard = dashboard_with(4, 4);
    let decision = dashboard.recommend(CSSE, date("2025-03-10"));
    assert_eq!(decision.outcome, AssignmentOutcome::AssignToPrimary);
    assert_eq!(decision.primary.unwrap().current, 0);
}

/// An override that shrinks Tyler's capacity is picked up on the next call.
#[test]
fn override_changes_next_recommendation() {
    let mut dashboard = dashboard_with(2, 0);
    let week = WeekKey::parse("2025-03-03").unwrap();

    let before = dashboard.recommend_for_week(CSSE, week);
    assert_eq!(before.outcome, AssignmentOutcome::AssignToPrimary);

    dashboard
        .set_override("Tyler", date("2025-03-05"), 50, "site visit")
        .unwrap();
    let after = dashboard.recommend_for_week(CSSE, week);
    assert_eq!(after.outcome, AssignmentOutcome::AssignToBackup);
    assert_eq!(after.primary.unwrap().max, 2);

    // Anxo at 0% leaves nobody.
    dashboard.set_override("Anxo", date("2025-03-03"), 0, "leave").unwrap();
    let last = dashboard.recommend_for_week(CSSE, week);
    assert_eq!(last.outcome, AssignmentOutcome::NoCapacity);
}

/// A department nobody covers yields NoMatch with no analyst data.
#[test]
fn unknown_department_is_no_match() {
    let dashboard = dashboard_with(0, 0);
    let decision = dashboard.recommend("Underwater Basket Weaving", date("2025-03-05"));

    assert_eq!(decision.outcome, AssignmentOutcome::NoMatch);
    assert!(decision.primary.is_none() && decision.backup.is_none());
    assert_eq!(
        decision.to_string(),
        "No analyst found for department 'Underwater Basket Weaving'."
    );
}

/// Excluded statuses never occupy capacity.
#[test]
fn closed_proposals_do_not_use_capacity() {
    let mut dashboard = Dashboard::build_test().unwrap();
    let mut records = proposals("Okafor, Tyler", 4, "2025-03-05");
    for (record, status) in records.iter_mut().zip(["Declined", "Withdrawn", "Award Received", "Submitted"]) {
        record.status = status.into();
    }
    dashboard.load_records(records);

    let decision = dashboard.recommend(CSSE, date("2025-03-05"));
    assert_eq!(decision.primary.unwrap().current, 1);
    assert_eq!(decision.outcome, AssignmentOutcome::AssignToPrimary);
}
