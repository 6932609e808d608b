use std::path::PathBuf;
use std::time::Duration;

/// Row accounting collected while the steps run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
}

/// What a finished run reports back to the caller.
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
    pub columns: usize,
    pub processing_time: Duration,
}

impl CleanSummary {
    pub fn new(output: PathBuf, stats: &CleanStats, columns: usize, processing_time: Duration) -> Self {
        CleanSummary {
            output,
            rows_read: stats.rows_read,
            rows_dropped: stats.rows_dropped,
            rows_written: stats.rows_written,
            columns,
            processing_time,
        }
    }
}
