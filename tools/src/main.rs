//! workload-dashboard: command-line front end for the pre-award workload core.
//!
//! Usage:
//!   workload-dashboard workload --csv export.csv --week 2025-03-05
//!   workload-dashboard recommend --csv export.csv --department "Physics" --date 2025-03-05
//!   workload-dashboard notify --deadline 2025-06-30
//!   workload-dashboard set-override --analyst Tyler --week 2025-03-03 --percentage 50 --reasoning "site visit"

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use workload_core::{
    config::DashboardConfig,
    dashboard::Dashboard,
    ingest::read_proposals_from_path,
    report::build_report,
    store::DashboardStore,
    types::{parse_date, WeekKey},
    workload::WorkloadRow,
};

#[derive(Parser)]
#[command(name = "workload-dashboard")]
#[command(about = "Pre-award analyst workload and assignment dashboard", long_about = None)]
struct Cli {
    /// Directory holding roster.json and departments.json
    #[arg(long, global = true, default_value = "./data")]
    data_dir: String,

    /// SQLite database for workload overrides
    #[arg(long, global = true, default_value = "workload.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Proposals per analyst for the week containing a date
    Workload {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, value_parser = parse_date_arg)]
        week: NaiveDate,
        /// Emit the table as JSON for a charting front end
        #[arg(long)]
        json: bool,
    },
    /// Recommend an analyst for a new proposal
    Recommend {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        department: String,
        /// Proposal deadline; defaults to today
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Notification date (20 working days before the deadline)
    Notify {
        #[arg(long, value_parser = parse_date_arg)]
        deadline: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },
    /// Record a capacity override for an analyst and week
    SetOverride {
        #[arg(long)]
        analyst: String,
        #[arg(long, value_parser = parse_date_arg)]
        week: NaiveDate,
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..=150))]
        percentage: i32,
        #[arg(long, default_value = "")]
        reasoning: String,
    },
    /// Show the override for an analyst and week
    ShowOverride {
        #[arg(long)]
        analyst: String,
        #[arg(long, value_parser = parse_date_arg)]
        week: NaiveDate,
    },
    /// List covered departments by category
    Departments,
    /// Write a markdown workload report for a week
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, value_parser = parse_date_arg)]
        week: NaiveDate,
        #[arg(long)]
        department: Option<String>,
        #[arg(long, default_value = "workload-report.md")]
        out: PathBuf,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = DashboardConfig::load(&cli.data_dir)?;
    let store = DashboardStore::open(&cli.db)
        .with_context(|| format!("failed to open override database {}", cli.db))?;
    store.migrate()?;
    if !matches!(cli.command, Commands::SetOverride { .. }) {
        store.set_read_only(true)?;
    }
    let mut dashboard = Dashboard::build(config, store)?;

    match cli.command {
        Commands::Workload { csv, week, json } => {
            load_export(&mut dashboard, &csv)?;
            let week = WeekKey::of(week);
            let rows = dashboard.workload(week);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_workload(&dashboard, week, &rows);
            }
        }
        Commands::Recommend { csv, department, date } => {
            load_export(&mut dashboard, &csv)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let decision = dashboard.recommend(&department, date);
            println!("{decision}");
        }
        Commands::Notify { deadline, today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let n = dashboard.notification(deadline, today);
            println!(
                "Deadline {}: notify pre-award by {} ({}).",
                n.deadline, n.notification_date, n.status
            );
        }
        Commands::SetOverride { analyst, week, percentage, reasoning } => {
            dashboard.set_override(&analyst, week, percentage, &reasoning)?;
            let week = WeekKey::of(week);
            log::info!("override for {analyst} in the week of {week} written to {}", cli.db);
            println!(
                "{analyst} set to {percentage}% for the week of {week} (capacity {}).",
                dashboard.overrides().capacity_for(&analyst, week)
            );
        }
        Commands::ShowOverride { analyst, week } => {
            match dashboard.get_override(&analyst, week) {
                Some(o) => println!(
                    "{analyst}, week of {}: {}% (capacity {}): {}",
                    WeekKey::of(week),
                    o.percentage,
                    o.capacity(),
                    if o.reasoning.is_empty() { "no reasoning given" } else { o.reasoning.as_str() }
                ),
                None => println!(
                    "{analyst}, week of {}: no override (100%, capacity 4).",
                    WeekKey::of(week)
                ),
            }
        }
        Commands::Departments => {
            for (category, departments) in dashboard.grouped_departments() {
                println!("{category}");
                for department in departments {
                    println!("  - {department}");
                }
            }
        }
        Commands::Report { csv, week, department, out } => {
            load_export(&mut dashboard, &csv)?;
            let week = WeekKey::of(week);
            let rows = dashboard.workload(week);
            let decision = department.map(|d| dashboard.recommend_for_week(&d, week));
            let report = build_report(week, dashboard.ledger(), &rows, decision.as_ref());
            std::fs::write(&out, report)?;
            log::info!("wrote workload report for {week} to {}", out.display());
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_export(dashboard: &mut Dashboard, csv: &Path) -> Result<()> {
    let summary = read_proposals_from_path(csv)
        .with_context(|| format!("failed to read proposal export {}", csv.display()))?;
    if summary.dropped > 0 {
        println!("Skipped {} row(s) without an analyst or a usable deadline.", summary.dropped);
    }
    log::info!(
        "loaded {} record(s) from {} ({} dropped)",
        summary.records.len(),
        csv.display(),
        summary.dropped
    );
    dashboard.load_records(summary.records);
    Ok(())
}

fn print_workload(dashboard: &Dashboard, week: WeekKey, rows: &[WorkloadRow]) {
    if dashboard.ledger().is_week_empty(week) {
        println!("No deadlines found for the week of {week}.");
        return;
    }
    println!("Rows per analyst for the week of {week}:");
    for row in rows {
        println!(
            "  {:<10} {:>2} / {:<2} {:<6} {}",
            row.analyst.display_name,
            row.count,
            row.capacity,
            row.band.label(),
            "#".repeat(row.count)
        );
    }
}
