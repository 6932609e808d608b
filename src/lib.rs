// src/lib.rs
pub mod categorize;
pub mod error;
pub mod extract;
pub mod financial;
pub mod frame;
pub mod input_format;
pub mod logging;
pub mod output_format;
pub mod pipeline;

pub use error::*;
pub use frame::{Cell, Column, Frame, Metric};
pub use pipeline::*;

pub use output_format::{OutputFormat, OutputFormatter};
pub use pipeline::config::PipelineConfig;
pub use pipeline::context::{CleanStats, CleanSummary};
pub use pipeline::contract::Stage;
pub use pipeline::schema::{ColumnKind, ColumnSpec, COLUMN_SCHEMA};
pub use pipeline::steps::FrameStep;
