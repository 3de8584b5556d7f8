//! End-to-end: proposal export → ledger → workload table and recommendation.

use workload_core::{
    dashboard::Dashboard,
    ingest::read_proposals_from_path,
    recommender::AssignmentOutcome,
    types::WeekKey,
    workload::ColorBand,
};

fn sample_export() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/sample_proposals.csv")
}

fn loaded_dashboard() -> Dashboard {
    let _ = env_logger::builder().is_test(true).try_init();
    let summary = read_proposals_from_path(&sample_export()).expect("read sample export");
    assert_eq!(summary.records.len(), 16);
    assert_eq!(summary.dropped, 2);

    let mut dashboard = Dashboard::build_test().expect("build test dashboard");
    dashboard.load_records(summary.records);
    dashboard
}

#[test]
fn sample_week_counts() {
    let dashboard = loaded_dashboard();
    let week = WeekKey::parse("2025-03-05").unwrap();

    let counts: Vec<(String, usize, ColorBand)> = dashboard
        .workload(week)
        .into_iter()
        .map(|r| (r.analyst.display_name, r.count, r.band))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Tyler".to_string(), 4, ColorBand::Red),
            ("Anxo".to_string(), 2, ColorBand::Green),
            ("Maribel".to_string(), 3, ColorBand::Yellow),
            ("Priya".to_string(), 1, ColorBand::Green),
            ("Lionel".to_string(), 0, ColorBand::Green),
        ]
    );

    assert_eq!(
        dashboard.ledger().weeks(),
        vec![
            WeekKey::parse("2025-03-03").unwrap(),
            WeekKey::parse("2025-03-10").unwrap(),
        ]
    );
}

#[test]
fn sample_week_recommendations() {
    let dashboard = loaded_dashboard();
    let week = WeekKey::parse("2025-03-03").unwrap();

    let csse = dashboard.recommend_for_week("Computer Science & Software Engineering", week);
    assert_eq!(csse.outcome, AssignmentOutcome::AssignToBackup);

    let physics = dashboard.recommend_for_week("physics", week);
    assert_eq!(physics.outcome, AssignmentOutcome::AssignToPrimary);
    assert_eq!(physics.primary.unwrap().current, 3);

    let none = dashboard.recommend_for_week("Underwater Basket Weaving", week);
    assert_eq!(none.outcome, AssignmentOutcome::NoMatch);
}
