use crate::error::CleanError;
use crate::frame::{Cell, Frame};
use serde_json::{Map, Number, Value};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "csv", help = "Comma-separated values")]
    Csv,
    #[value(name = "tsv", help = "Tab-separated values")]
    Tsv,
    #[value(name = "jsonl", help = "JSON Lines format (one JSON object per line)")]
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Render a cell for delimited output.
pub fn render_cell(cell: Cell<'_>) -> String {
    match cell {
        Cell::Number(n) => n.to_string(),
        Cell::Text(s) => s.to_string(),
        Cell::List(items) => serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()),
        Cell::Flag(true) => "True".to_string(),
        Cell::Flag(false) => "False".to_string(),
        Cell::Missing => String::new(),
    }
}

pub fn cell_to_json(cell: Cell<'_>) -> Value {
    match cell {
        Cell::Number(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        Cell::Text(s) => Value::String(s.to_string()),
        Cell::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        Cell::Flag(b) => Value::Bool(b),
        Cell::Missing => Value::Null,
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        OutputFormatter { format }
    }

    /// Write the header (if any) and every row of `frame`, then flush.
    pub fn write_frame<W: Write>(&self, output: &mut W, frame: &Frame) -> Result<(), CleanError> {
        match self.format {
            OutputFormat::Csv => self.write_separated_values(output, frame, b','),
            OutputFormat::Tsv => self.write_separated_values(output, frame, b'\t'),
            OutputFormat::Jsonl => self.write_jsonl(output, frame),
        }?;
        output.flush()?;
        Ok(())
    }

    fn write_separated_values<W: Write>(
        &self,
        output: &mut W,
        frame: &Frame,
        separator: u8,
    ) -> Result<(), CleanError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(separator)
            .from_writer(output);

        writer.write_record(frame.column_names())?;
        let columns: Vec<_> = frame.columns().map(|(_, column)| column).collect();
        for row in 0..frame.len() {
            writer.write_record(columns.iter().map(|column| render_cell(column.cell(row))))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_jsonl<W: Write>(&self, output: &mut W, frame: &Frame) -> Result<(), CleanError> {
        for row in 0..frame.len() {
            let record: Map<String, Value> = frame
                .columns()
                .map(|(name, column)| (name.to_string(), cell_to_json(column.cell(row))))
                .collect();
            let json_line = serde_json::to_string(&record)
                .map_err(|e| CleanError::Output(format!("JSON encoding error: {}", e)))?;
            writeln!(output, "{}", json_line)?;
        }
        Ok(())
    }
}
