//! The declared output schema and the fill policy driven by it.

use crate::extract::UNKNOWN;
use crate::frame::{Column, Frame, Metric};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    String,
    List,
}

/// One declared output column and whether missing values get imputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub fill: bool,
}

const fn spec(name: &'static str, kind: ColumnKind, fill: bool) -> ColumnSpec {
    ColumnSpec { name, kind, fill }
}

use self::ColumnKind::{List, Numeric, String as Text};

/// Output columns in emission order.
pub const COLUMN_SCHEMA: &[ColumnSpec] = &[
    spec("id", Numeric, false),
    spec("title", Text, true),
    spec("original_title", Text, true),
    spec("status", Text, false),
    spec("release_date", Text, false),
    spec("release_year", Numeric, false),
    spec("decade", Text, true),
    spec("primary_genre", Text, true),
    spec("genre_count", Numeric, false),
    spec("genres_list", List, true),
    spec("keywords_count", Numeric, false),
    spec("keywords_list", List, true),
    spec("top_keyword", Text, true),
    spec("director", Text, true),
    spec("production_companies_list", List, true),
    spec("primary_company", Text, true),
    spec("top_cast", List, true),
    spec("cast_list", List, true),
    spec("lead_actor", Text, true),
    spec("supporting_actor", Text, true),
    spec("ensemble_size", Numeric, false),
    spec("production_countries_list", List, true),
    spec("primary_country", Text, true),
    spec("spoken_languages_list", List, true),
    spec("primary_language", Text, true),
    spec("budget", Numeric, true),
    spec("revenue", Numeric, true),
    spec("profit", Numeric, true),
    // A zero budget leaves ROI undefined; imputing 0 would read as break-even.
    spec("roi", Numeric, false),
    spec("revenue_to_budget_ratio", Numeric, false),
    spec("budget_category", Text, true),
    spec("budget_millions", Numeric, false),
    spec("revenue_millions", Numeric, false),
    spec("runtime", Numeric, true),
    spec("runtime_bucket", Text, true),
    spec("vote_average", Numeric, true),
    spec("vote_count", Numeric, true),
    spec("vote_count_bucket", Text, true),
    spec("popularity", Numeric, true),
    spec("budget_log", Numeric, false),
    spec("revenue_log", Numeric, false),
    spec("profit_log", Numeric, false),
    spec("vote_count_log", Numeric, false),
    spec("popularity_log", Numeric, false),
    spec("is_profitable", Numeric, false),
];

pub fn column_names() -> Vec<&'static str> {
    COLUMN_SCHEMA.iter().map(|spec| spec.name).collect()
}

pub fn lookup(name: &str) -> Option<&'static ColumnSpec> {
    COLUMN_SCHEMA.iter().find(|spec| spec.name == name)
}

impl ColumnSpec {
    /// An all-missing column of this kind.
    pub fn empty_column(&self, rows: usize) -> Column {
        match self.kind {
            ColumnKind::Numeric => Column::Numeric(vec![Metric::Absent; rows]),
            ColumnKind::String => Column::Text(vec![None; rows]),
            ColumnKind::List => Column::List(vec![None; rows]),
        }
    }

    /// Impute missing cells per kind. Columns whose storage does not match
    /// the declared kind are left alone.
    pub fn fill_column(&self, column: &mut Column) {
        if !self.fill {
            return;
        }
        match (self.kind, column) {
            (ColumnKind::Numeric, Column::Numeric(values)) => {
                for value in values.iter_mut().filter(|v| v.is_missing()) {
                    *value = Metric::Known(0.0);
                }
            }
            (ColumnKind::String, Column::Text(values)) => {
                for value in values.iter_mut().filter(|v| v.is_none()) {
                    *value = Some(UNKNOWN.to_string());
                }
            }
            (ColumnKind::List, Column::List(values)) => {
                for value in values.iter_mut().filter(|v| v.is_none()) {
                    *value = Some(Vec::new());
                }
            }
            _ => {}
        }
    }
}

/// Materialise any declared column the frame lacks, then run the fill
/// policy over every declared column.
pub fn apply_fill(frame: &mut Frame) {
    let rows = frame.len();
    for spec in COLUMN_SCHEMA {
        if !frame.contains(spec.name) {
            frame.insert(spec.name, spec.empty_column(rows));
        }
        if let Some(column) = frame.get_mut(spec.name) {
            spec.fill_column(column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_names_are_unique() {
        let names = column_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.first(), Some(&"id"));
        assert_eq!(names.last(), Some(&"is_profitable"));
    }

    #[test]
    fn test_fill_respects_flag() {
        let mut budget = Column::Numeric(vec![Metric::Absent, Metric::Undefined, Metric::Known(3.0)]);
        lookup("budget").unwrap().fill_column(&mut budget);
        assert_eq!(
            budget,
            Column::Numeric(vec![Metric::Known(0.0), Metric::Known(0.0), Metric::Known(3.0)])
        );

        let mut roi = Column::Numeric(vec![Metric::Undefined]);
        lookup("roi").unwrap().fill_column(&mut roi);
        assert_eq!(roi, Column::Numeric(vec![Metric::Undefined]));
    }

    #[test]
    fn test_fill_by_kind() {
        let mut title = Column::Text(vec![None, Some("Up".to_string())]);
        lookup("title").unwrap().fill_column(&mut title);
        assert_eq!(title, Column::Text(vec![Some("Unknown".to_string()), Some("Up".to_string())]));

        let mut genres = Column::List(vec![None]);
        lookup("genres_list").unwrap().fill_column(&mut genres);
        assert_eq!(genres, Column::List(vec![Some(Vec::new())]));
    }

    #[test]
    fn test_apply_fill_materialises_missing_columns() {
        let mut frame = Frame::with_rows(2);
        apply_fill(&mut frame);

        assert_eq!(frame.width(), COLUMN_SCHEMA.len());
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.text("title"), Some(&[Some("Unknown".to_string()), Some("Unknown".to_string())][..]));
        assert_eq!(frame.text("status"), Some(&[None, None][..]));
        assert_eq!(frame.numeric("roi"), Some(&[Metric::Absent, Metric::Absent][..]));
    }
}
