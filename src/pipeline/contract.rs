//! Column contracts of the stages that consume the cleaned table.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::CleanError;
use crate::input_format::read_headers;

/// Command that regenerates the cleaned artifact.
pub const CLEAN_COMMAND: &str = "reelprep clean";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Stage {
    /// Decade by genre aggregation
    Genres,
    /// Budget tier aggregation
    Financials,
    /// Vote average regression
    Model,
}

const GENRE_COLUMNS: &[&str] = &["primary_genre", "decade"];

const FINANCIAL_COLUMNS: &[&str] = &[
    "budget_category",
    "roi",
    "is_profitable",
    "budget_millions",
    "profit",
    "id",
];

const MODEL_COLUMNS: &[&str] = &[
    "budget_log",
    "revenue_log",
    "profit_log",
    "budget_millions",
    "revenue_millions",
    "revenue_to_budget_ratio",
    "runtime",
    "genre_count",
    "vote_count_log",
    "popularity_log",
    "ensemble_size",
    "primary_genre",
    "director",
    "budget_category",
    "decade",
    "primary_language",
    "primary_country",
    "vote_count_bucket",
    "runtime_bucket",
    "top_keyword",
    "lead_actor",
    "vote_average",
];

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Genres => "genres",
            Stage::Financials => "financials",
            Stage::Model => "model",
        }
    }

    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Stage::Genres => GENRE_COLUMNS,
            Stage::Financials => FINANCIAL_COLUMNS,
            Stage::Model => MODEL_COLUMNS,
        }
    }

    /// Required columns absent from `available`, sorted.
    pub fn missing_columns<'a>(self, available: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let present: BTreeSet<&str> = available.into_iter().collect();
        let missing: BTreeSet<&str> = self
            .required_columns()
            .iter()
            .copied()
            .filter(|column| !present.contains(column))
            .collect();
        missing.into_iter().map(str::to_string).collect()
    }

    pub fn check_columns<'a>(self, available: impl IntoIterator<Item = &'a str>) -> Result<(), CleanError> {
        let columns = self.missing_columns(available);
        if columns.is_empty() {
            return Ok(());
        }
        Err(CleanError::MissingColumns {
            stage: self.name().to_string(),
            columns,
            rerun: CLEAN_COMMAND.to_string(),
        })
    }

    /// Validate the header of a cleaned artifact on disk.
    pub fn check_artifact(self, path: &Path, delimiter: u8) -> Result<(), CleanError> {
        let headers = read_headers(path, delimiter)?;
        self.check_columns(headers.iter().map(String::as_str))
    }
}
