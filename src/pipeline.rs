// src/pipeline.rs
pub mod config;
pub mod context;
pub mod contract;
pub mod dates;
pub mod schema;
pub mod steps;

use std::fs::{self, File};
use std::io::BufWriter;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::CleanError;
use crate::frame::Frame;
use crate::input_format::read_frame;
use crate::output_format::OutputFormatter;
use config::PipelineConfig;
use context::{CleanStats, CleanSummary};
use steps::{
    CoerceNumeric, DeriveCategories, DeriveFinancials, ExtractFields, FillMissing, FrameStep,
    OrderColumns, ParseReleaseDates,
};

/// Ordered list of whole-table steps turning a raw frame into a cleaned one
pub struct CleaningPipeline {
    steps: Vec<Box<dyn FrameStep>>,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl CleaningPipeline {
    pub fn new() -> Self {
        CleaningPipeline { steps: Vec::new() }
    }

    /// The movie cleaning stage: coerce, filter by date, extract, bucket,
    /// derive financials, fill, order.
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_step(Box::new(CoerceNumeric));
        pipeline.add_step(Box::new(ParseReleaseDates));
        pipeline.add_step(Box::new(ExtractFields));
        pipeline.add_step(Box::new(DeriveCategories));
        pipeline.add_step(Box::new(DeriveFinancials));
        pipeline.add_step(Box::new(FillMissing));
        pipeline.add_step(Box::new(OrderColumns));
        pipeline
    }

    pub fn add_step(&mut self, step: Box<dyn FrameStep>) {
        self.steps.push(step);
    }

    /// Run every step over `frame`. Never fails: malformed cells degrade to
    /// missing values and unparseable dates drop their row.
    pub fn clean(&self, mut frame: Frame) -> (Frame, CleanStats) {
        let mut stats = CleanStats {
            rows_read: frame.len(),
            ..CleanStats::default()
        };
        for step in &self.steps {
            step.apply(&mut frame, &mut stats);
            debug!(step = step.name(), rows = frame.len(), "step finished");
        }
        stats.rows_written = frame.len();
        (frame, stats)
    }

    /// Load the raw artifact, clean it and persist the result.
    pub fn run(&self, config: &PipelineConfig) -> Result<CleanSummary, CleanError> {
        let start_time = Instant::now();

        let raw = read_frame(&config.input, config.delimiter)?;
        info!(
            path = %config.input.display(),
            rows = raw.len(),
            columns = raw.width(),
            "loaded raw dataset"
        );

        let (cleaned, stats) = self.clean(raw);
        if stats.rows_dropped > 0 {
            info!(dropped = stats.rows_dropped, "dropped rows with unparseable release_date");
        }

        if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&config.output)?;
        let mut writer = BufWriter::new(file);
        OutputFormatter::new(config.output_format).write_frame(&mut writer, &cleaned)?;

        let summary = CleanSummary::new(
            config.output.clone(),
            &stats,
            cleaned.width(),
            start_time.elapsed(),
        );
        info!(
            path = %summary.output.display(),
            rows = summary.rows_written,
            columns = summary.columns,
            elapsed_ms = summary.processing_time.as_millis() as u64,
            "saved cleaned data"
        );
        Ok(summary)
    }
}

/// Run the standard cleaning stage with `config`.
pub fn clean_movie_data(config: &PipelineConfig) -> Result<CleanSummary, CleanError> {
    CleaningPipeline::standard().run(config)
}
