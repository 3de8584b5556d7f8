//! Ingestion boundary: proposal export (CSV) → typed `ProposalRecord`s.
//!
//! Rows without an analyst or with a missing/unparseable deadline are dropped
//! here, so the rest of the crate only ever sees clean records.

use crate::{
    error::{DashboardError, DashboardResult},
    types::ProposalRecord,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Headers every export must carry. Cells may be empty; columns may not.
const REQUIRED_COLUMNS: [&str; 5] = [
    "Record Number",
    "Record Owner",
    "Record Status",
    "PreAward Analyst",
    "Deadline Date",
];

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Record Number")]
    record_number: Option<String>,
    #[serde(rename = "Record Owner")]
    owner:         Option<String>,
    #[serde(rename = "Record Status")]
    status:        Option<String>,
    #[serde(rename = "PreAward Analyst")]
    analyst:       Option<String>,
    #[serde(rename = "Deadline Date")]
    deadline:      Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub records: Vec<ProposalRecord>,
    /// Rows dropped for a missing analyst or an unusable deadline.
    pub dropped: usize,
}

/// Parse a deadline cell. Accepts ISO dates, US `MM/DD/YYYY`, and ISO
/// datetimes (the time part is discarded).
pub fn parse_deadline(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub fn read_proposals<R: Read>(reader: R) -> DashboardResult<IngestSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::MissingColumns { columns: missing });
    }

    let mut summary = IngestSummary::default();

    for (index, result) in reader.deserialize::<ExportRow>().enumerate() {
        let row = result?;
        let analyst = row.analyst.filter(|a| !a.is_empty());
        let deadline = row.deadline.as_deref().and_then(parse_deadline);

        match (analyst, deadline) {
            (Some(analyst), Some(deadline)) => summary.records.push(ProposalRecord {
                record_number: row.record_number.unwrap_or_default(),
                owner:         row.owner.unwrap_or_default(),
                status:        row.status.unwrap_or_default(),
                analyst,
                deadline,
            }),
            _ => {
                log::debug!("dropping export row {}: missing analyst or deadline", index + 1);
                summary.dropped += 1;
            }
        }
    }

    if summary.dropped > 0 {
        log::warn!(
            "dropped {} row(s) without an analyst or a usable deadline",
            summary.dropped
        );
    }
    log::info!("ingested {} proposal record(s)", summary.records.len());
    Ok(summary)
}

pub fn read_proposals_from_path(path: &Path) -> DashboardResult<IngestSummary> {
    let file = std::fs::File::open(path)?;
    read_proposals(file)
}
