//! Threshold bucketing of numeric attributes into labels.

use crate::extract::UNKNOWN;

/// Label used by the numeric buckets when the input is missing.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Half-open ranges partitioning the real line.
///
/// Each `(upper, label)` bound covers values strictly below `upper` and at or
/// above the previous bound, so a boundary value belongs to the next bucket.
#[derive(Debug, Clone, Copy)]
pub struct Buckets {
    bounds: &'static [(f64, &'static str)],
    overflow: &'static str,
}

impl Buckets {
    pub const fn new(bounds: &'static [(f64, &'static str)], overflow: &'static str) -> Self {
        Buckets { bounds, overflow }
    }

    pub fn label(&self, value: Option<f64>) -> &'static str {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            return UNKNOWN_BUCKET;
        };
        self.bounds
            .iter()
            .find(|(upper, _)| v < *upper)
            .map_or(self.overflow, |(_, label)| *label)
    }
}

pub const BUDGET: Buckets = Buckets::new(&[(20_000_000.0, "low"), (80_000_000.0, "medium")], "high");

pub const VOTE_COUNT: Buckets = Buckets::new(&[(500.0, "emerging"), (2_000.0, "established")], "blockbuster");

pub const RUNTIME: Buckets = Buckets::new(
    &[(90.0, "short"), (120.0, "standard"), (150.0, "extended")],
    "epic",
);

/// Decade label for a release year, e.g. `1995` becomes `"1990s"`.
pub fn decade_label(year: Option<f64>) -> String {
    match year.filter(|y| y.is_finite()) {
        Some(y) => {
            // `+ 0.0` normalises a negative zero
            let decade = (y / 10.0).floor() * 10.0 + 0.0;
            format!("{:.0}s", decade)
        }
        None => UNKNOWN.to_string(),
    }
}

pub fn budget_category(amount: Option<f64>) -> &'static str {
    BUDGET.label(amount)
}

pub fn vote_count_bucket(votes: Option<f64>) -> &'static str {
    VOTE_COUNT.label(votes)
}

pub fn runtime_bucket(minutes: Option<f64>) -> &'static str {
    RUNTIME.label(minutes)
}
