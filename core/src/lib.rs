//! Pre-award workload dashboard core.
//!
//! Week-bucketed proposal counts, capacity overrides, department coverage
//! and the assignment recommendation. Rendering and spreadsheet upload live
//! outside this crate.

pub mod business_days;
pub mod config;
pub mod dashboard;
pub mod department_directory;
pub mod error;
pub mod holiday_calendar;
pub mod ingest;
pub mod ledger;
pub mod override_store;
pub mod recommender;
pub mod report;
pub mod store;
pub mod types;
pub mod workload;
