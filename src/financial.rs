//! Column-wise financial features with explicit domain guards.
//!
//! Every function takes whole columns and returns a new column of the same
//! length. A guard that refuses a computation yields [`Metric::Undefined`];
//! missing inputs stay [`Metric::Absent`].

use crate::frame::Metric;

pub const MILLION: f64 = 1_000_000.0;

/// `revenue - budget`, row by row.
pub fn profit(budget: &[Metric], revenue: &[Metric]) -> Vec<Metric> {
    revenue
        .iter()
        .zip(budget)
        .map(|(r, b)| r.zip_with(*b, |r, b| r - b))
        .collect()
}

/// Replace every value `<= 0` with [`Metric::Undefined`].
pub fn mask_nonpositive(series: &[Metric]) -> Vec<Metric> {
    series
        .iter()
        .map(|m| match m {
            Metric::Known(v) if *v <= 0.0 => Metric::Undefined,
            other => *other,
        })
        .collect()
}

/// `(revenue - budget) / budget`, defined only for positive budgets.
pub fn roi(budget: &[Metric], revenue: &[Metric]) -> Vec<Metric> {
    let gains = profit(budget, revenue);
    gains
        .iter()
        .zip(mask_nonpositive(budget))
        .map(|(gain, base)| base.zip_with(*gain, |base, gain| gain / base))
        .collect()
}

/// A missing profit counts as not profitable.
pub fn is_profitable(profit: &[Metric]) -> Vec<bool> {
    profit
        .iter()
        .map(|p| p.value().is_some_and(|v| v > 0.0))
        .collect()
}

pub fn to_millions(series: &[Metric]) -> Vec<Metric> {
    series.iter().map(|m| m.map(|v| v / MILLION)).collect()
}

/// `revenue / budget`. Only an exactly zero budget is guarded; negative
/// budgets still divide.
pub fn revenue_to_budget_ratio(budget: &[Metric], revenue: &[Metric]) -> Vec<Metric> {
    revenue
        .iter()
        .zip(budget)
        .map(|(r, b)| match b {
            Metric::Known(v) if *v == 0.0 => Metric::Undefined,
            b => b.zip_with(*r, |b, r| r / b),
        })
        .collect()
}

/// Clamp negatives to zero, then `ln(1 + x)`.
pub fn log1p_nonnegative(series: &[Metric]) -> Vec<Metric> {
    series.iter().map(|m| m.map(|v| v.max(0.0).ln_1p())).collect()
}
