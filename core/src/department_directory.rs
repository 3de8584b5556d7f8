//! Department directory: who covers which department, and who backs them up.
//!
//! Resolution is the legacy rule, kept as-is: the query is matched
//! case-insensitively as a substring of each row's department list joined
//! into one string, and the first row in table order wins. Partial names
//! match, and a query can straddle two adjacent department names.

use crate::{
    config::DashboardConfig,
    error::{DashboardError, DashboardResult},
    types::Analyst,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separator used when a row's departments are joined for matching.
const JOIN_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentAssignment {
    pub analyst:     Analyst,
    pub departments: Vec<String>,
    pub backup:      Analyst,
    joined_lower:    String,
}

/// Primary and backup analyst for a resolved department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub primary: Analyst,
    pub backup:  Analyst,
}

#[derive(Debug, Clone)]
pub struct DepartmentDirectory {
    rows: Vec<DepartmentAssignment>,
}

impl DepartmentDirectory {
    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        let roster = config.roster();
        let lookup = |display: &str| -> DashboardResult<Analyst> {
            roster
                .iter()
                .find(|a| a.display_name == display)
                .cloned()
                .ok_or_else(|| DashboardError::UnknownAnalyst { name: display.to_string() })
        };

        let rows = config
            .assignments
            .iter()
            .map(|row| {
                Ok(DepartmentAssignment {
                    analyst:      lookup(&row.analyst)?,
                    backup:       lookup(&row.backup)?,
                    joined_lower: row.departments.join(JOIN_SEPARATOR).to_lowercase(),
                    departments:  row.departments.clone(),
                })
            })
            .collect::<DashboardResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// First row whose joined department text contains `department`.
    /// A blank query resolves to nothing.
    pub fn resolve(&self, department: &str) -> Option<Coverage> {
        if department.trim().is_empty() {
            return None;
        }
        let needle = department.to_lowercase();
        let hit = self.rows.iter().find(|row| row.joined_lower.contains(&needle));
        match hit {
            Some(row) => {
                log::debug!("'{department}' resolved to {} (backup {})", row.analyst, row.backup);
                Some(Coverage {
                    primary: row.analyst.clone(),
                    backup:  row.backup.clone(),
                })
            }
            None => {
                log::debug!("'{department}' matched no directory row");
                None
            }
        }
    }

    /// Every department name once, exact strings, ascending.
    pub fn list_departments(&self) -> Vec<String> {
        let all: BTreeSet<&String> = self.rows.iter().flat_map(|r| r.departments.iter()).collect();
        all.into_iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DepartmentCategory {
    Academic,
    Engineering,
    Science,
    CenterInstitute,
    Administration,
    ArtsCommunication,
    Other,
}

impl DepartmentCategory {
    /// Precedence and display order.
    pub const ALL: [DepartmentCategory; 7] = [
        DepartmentCategory::Academic,
        DepartmentCategory::Engineering,
        DepartmentCategory::Science,
        DepartmentCategory::CenterInstitute,
        DepartmentCategory::Administration,
        DepartmentCategory::ArtsCommunication,
        DepartmentCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DepartmentCategory::Academic          => "Academic",
            DepartmentCategory::Engineering       => "Engineering",
            DepartmentCategory::Science           => "Science",
            DepartmentCategory::CenterInstitute   => "Center/Institute",
            DepartmentCategory::Administration    => "Administration",
            DepartmentCategory::ArtsCommunication => "Arts/Communication",
            DepartmentCategory::Other             => "Other",
        }
    }

    /// Keyword classification, first matching category in `ALL` order.
    pub fn classify(department: &str) -> Self {
        let name = department.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| name.contains(w));

        if any(&["college", "university", "education", "studies"]) {
            DepartmentCategory::Academic
        } else if name.contains("engineering") {
            DepartmentCategory::Engineering
        } else if any(&["science", "biology", "chemistry", "physics", "mathematics", "statistics"])
            && !name.contains("engineering")
        {
            DepartmentCategory::Science
        } else if any(&["institute", "center"]) {
            DepartmentCategory::CenterInstitute
        } else if any(&["office", "dean", "administration", "services"]) {
            DepartmentCategory::Administration
        } else if any(&["art", "design", "communication", "journalism", "music", "theatre"]) {
            DepartmentCategory::ArtsCommunication
        } else {
            DepartmentCategory::Other
        }
    }
}

impl fmt::Display for DepartmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket departments by category. Only non-empty categories are returned,
/// in `DepartmentCategory::ALL` order; input order is kept within each.
pub fn group(departments: &[String]) -> Vec<(DepartmentCategory, Vec<String>)> {
    DepartmentCategory::ALL
        .iter()
        .filter_map(|&category| {
            let members: Vec<String> = departments
                .iter()
                .filter(|d| DepartmentCategory::classify(d) == category)
                .cloned()
                .collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}
