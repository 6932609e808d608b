//! In-memory columnar table shared by every cleaning step.
//!
//! Columns are typed and kept in insertion order. Numeric cells carry an
//! explicit [`Metric`] state instead of a NaN sentinel, so a value that was
//! never supplied can be told apart from one a domain guard refused to
//! compute.

use indexmap::IndexMap;

/// A numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Known(f64),
    /// The input was missing or did not parse as a number.
    Absent,
    /// A domain guard (zero denominator, non-positive mask) rejected the value.
    Undefined,
}

impl Metric {
    /// Wrap a float, treating NaN and infinities as absent.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Metric::Known(value)
        } else {
            Metric::Absent
        }
    }

    /// Lenient numeric coercion of a raw text cell.
    pub fn parse(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            Some(s) if !s.is_empty() => s.parse::<f64>().map_or(Metric::Absent, Metric::from_f64),
            _ => Metric::Absent,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Known(v) => Some(v),
            Metric::Absent | Metric::Undefined => None,
        }
    }

    pub fn is_missing(self) -> bool {
        !matches!(self, Metric::Known(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Metric::Known(v) => Metric::Known(f(v)),
            other => other,
        }
    }

    /// Combine two cells; the first missing operand decides the missing state.
    pub fn zip_with(self, other: Metric, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Metric::Known(a), Metric::Known(b)) => Metric::Known(f(a, b)),
            (Metric::Known(_), missing) | (missing, _) => missing,
        }
    }
}

/// A borrowed view of one cell, used by the writers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Number(f64),
    Text(&'a str),
    List(&'a [String]),
    Flag(bool),
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Metric>),
    Text(Vec<Option<String>>),
    List(Vec<Option<Vec<String>>>),
    Flag(Vec<bool>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::List(v) => v.len(),
            Column::Flag(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell(&self, row: usize) -> Cell<'_> {
        match self {
            Column::Numeric(v) => match v.get(row) {
                Some(Metric::Known(x)) => Cell::Number(*x),
                _ => Cell::Missing,
            },
            Column::Text(v) => match v.get(row) {
                Some(Some(s)) => Cell::Text(s),
                _ => Cell::Missing,
            },
            Column::List(v) => match v.get(row) {
                Some(Some(items)) => Cell::List(items),
                _ => Cell::Missing,
            },
            Column::Flag(v) => v.get(row).map_or(Cell::Missing, |b| Cell::Flag(*b)),
        }
    }

    fn retain(&mut self, keep: &[bool]) {
        fn filter<T>(values: &mut Vec<T>, keep: &[bool]) {
            let mut flags = keep.iter();
            values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        match self {
            Column::Numeric(v) => filter(v, keep),
            Column::Text(v) => filter(v, keep),
            Column::List(v) => filter(v, keep),
            Column::Flag(v) => filter(v, keep),
        }
    }
}

/// Ordered collection of equally long columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: IndexMap<String, Column>,
    rows: usize,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty frame that already knows its row count.
    pub fn with_rows(rows: usize) -> Self {
        Frame {
            columns: IndexMap::new(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    pub fn numeric(&self, name: &str) -> Option<&[Metric]> {
        match self.columns.get(name) {
            Some(Column::Numeric(v)) => Some(v),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&[Option<String>]> {
        match self.columns.get(name) {
            Some(Column::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[Option<Vec<String>>]> {
        match self.columns.get(name) {
            Some(Column::List(v)) => Some(v),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<&[bool]> {
        match self.columns.get(name) {
            Some(Column::Flag(v)) => Some(v),
            _ => None,
        }
    }

    /// Insert or replace a column. A replaced column keeps its position;
    /// a new one is appended.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) {
        if self.columns.is_empty() {
            self.rows = column.len();
        }
        debug_assert_eq!(column.len(), self.rows, "column length must match frame");
        self.columns.insert(name.into(), column);
    }

    /// Keep only the rows whose mask entry is true.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for column in self.columns.values_mut() {
            column.retain(keep);
        }
        self.rows = keep.iter().take(self.rows).filter(|k| **k).count();
    }

    /// Move `preferred` columns (those present) to the front in the given
    /// order; every other column follows in its current order.
    pub fn reorder(&mut self, preferred: &[&str]) {
        let mut ordered = IndexMap::with_capacity(self.columns.len());
        for name in preferred {
            if let Some((key, column)) = self.columns.shift_remove_entry(*name) {
                ordered.insert(key, column);
            }
        }
        ordered.extend(self.columns.drain(..));
        self.columns = ordered;
    }
}
