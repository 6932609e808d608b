// src/input_format.rs - delimited text into a Frame

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CleanError;
use crate::frame::{Column, Frame};

/// Load a delimited file with a header row. Every column comes back as text;
/// empty cells are missing.
pub fn read_frame(path: &Path, delimiter: u8) -> Result<Frame, CleanError> {
    let file = open_input(path)?;
    read_frame_from(file, delimiter)
}

/// Short rows are padded with missing cells; rows wider than the header fail.
pub fn read_frame_from<R: Read>(input: R, delimiter: u8) -> Result<Frame, CleanError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = dedupe_headers(reader.headers()?.iter());
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(CleanError::TooManyFields {
                row: record.position().map_or(0, |p| p.line()),
                found: record.len(),
                expected: headers.len(),
            });
        }
        for (index, column) in columns.iter_mut().enumerate() {
            let cell = record.get(index).filter(|cell| !cell.is_empty());
            column.push(cell.map(str::to_string));
        }
    }

    let mut frame = Frame::new();
    for (name, cells) in headers.into_iter().zip(columns) {
        frame.insert(name, Column::Text(cells));
    }
    Ok(frame)
}

/// Header row of a delimited file, as the reader would name the columns.
pub fn read_headers(path: &Path, delimiter: u8) -> Result<Vec<String>, CleanError> {
    let file = open_input(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(file);
    Ok(dedupe_headers(reader.headers()?.iter()))
}

fn open_input(path: &Path) -> Result<File, CleanError> {
    if !path.exists() {
        return Err(CleanError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

// Repeated names get a numeric suffix (`name.1`, `name.2`, ...)
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|header| {
        let header = header.trim().to_string();
        let count = seen.entry(header.clone()).or_insert(0);
        let name = if *count == 0 {
            header
        } else {
            format!("{}.{}", header, count)
        };
        *count += 1;
        name
    })
    .collect()
}
