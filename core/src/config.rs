use crate::types::{display_name_for, Analyst};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One row of the department directory, analysts named by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentAssignmentConfig {
    pub analyst:     String,
    pub departments: Vec<String>,
    pub backup:      String,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterFile {
    analyst_roster: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DepartmentsFile {
    assignments: Vec<DepartmentAssignmentConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Full names ("Last, First") of every active analyst, in chart order.
    pub analyst_roster: Vec<String>,
    /// Department directory, in resolution order.
    pub assignments:    Vec<DepartmentAssignmentConfig>,
}

impl DashboardConfig {
    /// Load `roster.json` and `departments.json` from `data_dir`.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let dir = Path::new(data_dir);

        let roster_path = dir.join("roster.json");
        let roster_content = std::fs::read_to_string(&roster_path)
            .with_context(|| format!("reading {}", roster_path.display()))?;
        let roster: RosterFile = serde_json::from_str(&roster_content)
            .with_context(|| format!("parsing {}", roster_path.display()))?;

        let departments_path = dir.join("departments.json");
        let departments_content = std::fs::read_to_string(&departments_path)
            .with_context(|| format!("reading {}", departments_path.display()))?;
        let departments: DepartmentsFile = serde_json::from_str(&departments_content)
            .with_context(|| format!("parsing {}", departments_path.display()))?;

        let config = Self {
            analyst_roster: roster.analyst_roster,
            assignments:    departments.assignments,
        };
        config.validate()?;
        log::info!(
            "loaded config from {data_dir}: {} analysts, {} directory rows",
            config.analyst_roster.len(),
            config.assignments.len()
        );
        Ok(config)
    }

    /// Display names must be unique, and every analyst the directory names
    /// (primary or backup) must be on the roster.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for full_name in &self.analyst_roster {
            let display = display_name_for(full_name);
            if display.is_empty() {
                bail!("roster entry '{full_name}' has no display name");
            }
            if !seen.insert(display.clone()) {
                bail!("display name '{display}' is used by more than one rostered analyst");
            }
        }
        for row in &self.assignments {
            for name in [&row.analyst, &row.backup] {
                if !seen.contains(name.as_str()) {
                    bail!("directory names '{name}', who is not on the analyst roster");
                }
            }
        }
        Ok(())
    }

    pub fn roster(&self) -> Vec<Analyst> {
        self.analyst_roster
            .iter()
            .map(|name| Analyst::from_full_name(name))
            .collect()
    }

    /// The institutional configuration shipped in `data/`, for tests.
    pub fn default_test() -> Self {
        let row = |analyst: &str, departments: &[&str], backup: &str| DepartmentAssignmentConfig {
            analyst:     analyst.into(),
            departments: departments.iter().map(|d| d.to_string()).collect(),
            backup:      backup.into(),
        };

        Self {
            analyst_roster: vec![
                "Okafor, Tyler".into(),
                "Villanueva, Anxo".into(),
                "Brennan, Maribel".into(),
                "Kessler, Priya".into(),
                "Duarte, Lionel".into(),
            ],
            assignments: vec![
                row(
                    "Tyler",
                    &[
                        "Computer Science & Software Engineering",
                        "Electrical Engineering",
                        "Computer Engineering",
                        "Mechanical Engineering",
                    ],
                    "Anxo",
                ),
                row(
                    "Anxo",
                    &[
                        "Aerospace Engineering",
                        "Civil & Environmental Engineering",
                        "Industrial & Manufacturing Engineering",
                        "Biomedical Engineering",
                        "Materials Engineering",
                    ],
                    "Tyler",
                ),
                row(
                    "Maribel",
                    &[
                        "Biological Sciences",
                        "Chemistry & Biochemistry",
                        "Physics",
                        "Mathematics",
                        "Statistics",
                        "Kinesiology & Public Health",
                        "Center for Coastal Marine Sciences",
                    ],
                    "Priya",
                ),
                row(
                    "Priya",
                    &[
                        "Agribusiness",
                        "Animal Science",
                        "Natural Resources Management & Environmental Sciences",
                        "Wine & Viticulture",
                        "Food Science & Nutrition",
                        "Irrigation Training & Research Center",
                    ],
                    "Lionel",
                ),
                row(
                    "Lionel",
                    &[
                        "Art & Design",
                        "Communication Studies",
                        "Journalism",
                        "Music",
                        "Theatre & Dance",
                        "School of Education",
                        "Office of the Dean - Orfalea College of Business",
                        "Institute for Advanced Technology & Public Policy",
                        "Student Affairs Services",
                    ],
                    "Maribel",
                ),
            ],
        }
    }
}
