use crate::output_format::OutputFormat;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data/movies_raw.csv";
pub const DEFAULT_OUTPUT: &str = "results/movies_clean.csv";

/// Configuration for a cleaning run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    pub output_format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: b',',
            output_format: OutputFormat::default(), // csv
        }
    }
}

/// Raw columns coerced to numbers before anything else runs.
pub const NUMERIC_INPUTS: &[&str] = &[
    "budget",
    "revenue",
    "runtime",
    "vote_average",
    "vote_count",
    "popularity",
];
