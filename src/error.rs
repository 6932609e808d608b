use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("Raw dataset not found at {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row} has {found} fields, but the header declares {expected}")]
    TooManyFields { row: u64, found: usize, expected: usize },

    #[error("Output error: {0}")]
    Output(String),

    #[error(
        "Dataset missing required columns for the {stage} stage: {}. Re-run `{rerun}` to regenerate features.",
        columns.join(", ")
    )]
    MissingColumns {
        stage: String,
        columns: Vec<String>,
        rerun: String,
    },
}

impl CleanError {
    /// True when the run never got as far as reading data.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, CleanError::MissingInput { .. })
    }
}
