use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Invalid date '{value}'")]
    InvalidDate { value: String },

    #[error("Invalid override key '{key}': expected '<analyst>|<Monday as YYYY-MM-DD>'")]
    InvalidOverrideKey { key: String },

    #[error("Analyst '{name}' is not on the roster")]
    UnknownAnalyst { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
