// src/pipeline/steps.rs
use chrono::Datelike;
use tracing::{debug, warn};

use crate::categorize::{budget_category, decade_label, runtime_bucket, vote_count_bucket};
use crate::extract::{extract_codes, extract_director, take_first, FieldExtractor, Picker, UNKNOWN};
use crate::financial;
use crate::frame::{Column, Frame, Metric};
use crate::pipeline::config::NUMERIC_INPUTS;
use crate::pipeline::context::CleanStats;
use crate::pipeline::dates::{format_date, parse_release_date};
use crate::pipeline::schema;

/// One whole-table transform in the cleaning pipeline
pub trait FrameStep {
    fn apply(&self, frame: &mut Frame, stats: &mut CleanStats);
    fn name(&self) -> &str;
}

/// Raw text cells of `name`, or all-missing if the column is absent.
fn raw_cells(frame: &Frame, name: &str) -> Vec<Option<String>> {
    match frame.text(name) {
        Some(cells) => cells.to_vec(),
        None => vec![None; frame.len()],
    }
}

/// Numeric cells of `name`, or all-absent if the column is absent.
fn metrics(frame: &Frame, name: &str) -> Vec<Metric> {
    match frame.numeric(name) {
        Some(values) => values.to_vec(),
        None => vec![Metric::Absent; frame.len()],
    }
}

fn extract_lists(frame: &Frame, source: &str, extractor: &FieldExtractor) -> Vec<Vec<String>> {
    raw_cells(frame, source)
        .iter()
        .map(|cell| extractor.extract(cell.as_deref()))
        .collect()
}

fn list_column(lists: &[Vec<String>]) -> Column {
    Column::List(lists.iter().cloned().map(Some).collect())
}

fn count_column(lists: &[Vec<String>]) -> Column {
    Column::Numeric(lists.iter().map(|l| Metric::Known(l.len() as f64)).collect())
}

fn pick_column(lists: &[Vec<String>], picker: &Picker) -> Column {
    Column::Text(lists.iter().map(|l| Some(picker.pick(l))).collect())
}

fn label_column(values: &[Metric], label: fn(Option<f64>) -> &'static str) -> Column {
    Column::Text(values.iter().map(|m| Some(label(m.value()).to_string())).collect())
}

/// Coerce the raw numeric inputs; unparseable cells become absent.
pub struct CoerceNumeric;

impl FrameStep for CoerceNumeric {
    fn apply(&self, frame: &mut Frame, _stats: &mut CleanStats) {
        for &name in NUMERIC_INPUTS {
            let coerced = match frame.get(name) {
                Some(Column::Numeric(_)) => continue,
                Some(Column::Text(cells)) => cells.iter().map(|c| Metric::parse(c.as_deref())).collect(),
                Some(_) | None => vec![Metric::Absent; frame.len()],
            };
            frame.insert(name, Column::Numeric(coerced));
        }
    }

    fn name(&self) -> &str {
        "coerce_numeric"
    }
}

/// Drop rows whose `release_date` does not parse; normalise the rest and
/// derive `release_year`.
pub struct ParseReleaseDates;

impl FrameStep for ParseReleaseDates {
    fn apply(&self, frame: &mut Frame, stats: &mut CleanStats) {
        if !frame.contains("release_date") {
            warn!("input has no release_date column; every row will be dropped");
        }
        let parsed: Vec<_> = raw_cells(frame, "release_date")
            .iter()
            .map(|cell| cell.as_deref().and_then(parse_release_date))
            .collect();

        let keep: Vec<bool> = parsed.iter().map(Option::is_some).collect();
        let before = frame.len();
        frame.retain_rows(&keep);
        stats.rows_dropped += before - frame.len();

        let dates: Vec<_> = parsed.into_iter().flatten().collect();
        frame.insert(
            "release_date",
            Column::Text(dates.iter().map(|d| Some(format_date(*d))).collect()),
        );
        frame.insert(
            "release_year",
            Column::Numeric(dates.iter().map(|d| Metric::Known(f64::from(d.year()))).collect()),
        );
    }

    fn name(&self) -> &str {
        "parse_release_dates"
    }
}

/// Parse the JSON list columns and derive counts and picks from them.
pub struct ExtractFields;

impl FrameStep for ExtractFields {
    fn apply(&self, frame: &mut Frame, _stats: &mut CleanStats) {
        let names = FieldExtractor::names();
        let genres = extract_lists(frame, "genres", &names);
        let keywords = extract_lists(frame, "keywords", &names);
        let companies = extract_lists(frame, "production_companies", &names);
        let countries = extract_lists(frame, "production_countries", &extract_codes("iso_3166_1"));
        let languages = extract_lists(frame, "spoken_languages", &extract_codes("iso_639_1"));
        let cast = extract_lists(frame, "cast", &names);
        let directors: Vec<_> = raw_cells(frame, "crew")
            .iter()
            .map(|cell| Some(extract_director(cell.as_deref())))
            .collect();
        let original_language = raw_cells(frame, "original_language");

        let first = Picker::new(0);

        frame.insert("genres_list", list_column(&genres));
        frame.insert("genre_count", count_column(&genres));
        frame.insert("primary_genre", pick_column(&genres, &first));

        frame.insert("keywords_list", list_column(&keywords));
        frame.insert("keywords_count", count_column(&keywords));
        frame.insert("top_keyword", pick_column(&keywords, &Picker::with_default(0, "None")));

        frame.insert("production_companies_list", list_column(&companies));
        frame.insert("primary_company", pick_column(&companies, &first));

        frame.insert("production_countries_list", list_column(&countries));
        frame.insert("primary_country", pick_column(&countries, &first));

        frame.insert("spoken_languages_list", list_column(&languages));
        frame.insert(
            "primary_language",
            Column::Text(
                languages
                    .iter()
                    .zip(&original_language)
                    .map(|(spoken, original)| Some(primary_language(spoken, original.as_deref())))
                    .collect(),
            ),
        );

        frame.insert("director", Column::Text(directors));

        frame.insert("cast_list", list_column(&cast));
        frame.insert(
            "top_cast",
            Column::List(cast.iter().map(|c| Some(take_first(3).take(c))).collect()),
        );
        frame.insert("lead_actor", pick_column(&cast, &first));
        frame.insert("supporting_actor", pick_column(&cast, &Picker::new(1)));
        frame.insert("ensemble_size", count_column(&cast));
    }

    fn name(&self) -> &str {
        "extract_fields"
    }
}

/// First spoken language, else the raw original language, else unknown.
pub fn primary_language(spoken: &[String], original: Option<&str>) -> String {
    if !spoken.is_empty() {
        return Picker::new(0).pick(spoken);
    }
    match original {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Bucket year, budget, vote count and runtime into labels.
pub struct DeriveCategories;

impl FrameStep for DeriveCategories {
    fn apply(&self, frame: &mut Frame, _stats: &mut CleanStats) {
        let years = metrics(frame, "release_year");
        frame.insert(
            "decade",
            Column::Text(years.iter().map(|y| Some(decade_label(y.value()))).collect()),
        );

        let budget = label_column(&metrics(frame, "budget"), budget_category);
        frame.insert("budget_category", budget);
        let votes = label_column(&metrics(frame, "vote_count"), vote_count_bucket);
        frame.insert("vote_count_bucket", votes);
        let runtime = label_column(&metrics(frame, "runtime"), runtime_bucket);
        frame.insert("runtime_bucket", runtime);
    }

    fn name(&self) -> &str {
        "derive_categories"
    }
}

/// Profit, ROI, ratios and log-compressed variants.
pub struct DeriveFinancials;

impl FrameStep for DeriveFinancials {
    fn apply(&self, frame: &mut Frame, _stats: &mut CleanStats) {
        let budget = metrics(frame, "budget");
        let revenue = metrics(frame, "revenue");
        let profit = financial::profit(&budget, &revenue);

        frame.insert("roi", Column::Numeric(financial::roi(&budget, &revenue)));
        frame.insert("is_profitable", Column::Flag(financial::is_profitable(&profit)));
        frame.insert("budget_millions", Column::Numeric(financial::to_millions(&budget)));
        frame.insert("revenue_millions", Column::Numeric(financial::to_millions(&revenue)));
        frame.insert(
            "revenue_to_budget_ratio",
            Column::Numeric(financial::revenue_to_budget_ratio(&budget, &revenue)),
        );

        frame.insert("budget_log", Column::Numeric(financial::log1p_nonnegative(&budget)));
        frame.insert("revenue_log", Column::Numeric(financial::log1p_nonnegative(&revenue)));
        frame.insert("profit_log", Column::Numeric(financial::log1p_nonnegative(&profit)));
        for (source, target) in [("vote_count", "vote_count_log"), ("popularity", "popularity_log")] {
            let logged = financial::log1p_nonnegative(&metrics(frame, source));
            frame.insert(target, Column::Numeric(logged));
        }

        frame.insert("profit", Column::Numeric(profit));
    }

    fn name(&self) -> &str {
        "derive_financials"
    }
}

/// Impute declared columns per their fill policy.
pub struct FillMissing;

impl FrameStep for FillMissing {
    fn apply(&self, frame: &mut Frame, _stats: &mut CleanStats) {
        schema::apply_fill(frame);
    }

    fn name(&self) -> &str {
        "fill_missing"
    }
}

/// Declared columns first, passthrough columns after.
pub struct OrderColumns;

impl FrameStep for OrderColumns {
    fn apply(&self, frame: &mut Frame, _stats: &mut CleanStats) {
        frame.reorder(&schema::column_names());
        debug!(columns = frame.width(), "columns ordered");
    }

    fn name(&self) -> &str {
        "order_columns"
    }
}
