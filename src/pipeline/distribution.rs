//! Distribution summaries: histograms, kernel density curves and box summaries

use std::cmp::Ordering;

use polars::prelude::*;

use super::columns::ATTRITION;
use super::encode::AttritionTable;
use super::error::ReportError;

/// Number of points on a kernel density curve
pub const KDE_POINTS: usize = 200;

/// Box whiskers reach at most this many IQRs past the box
const WHISKER_IQR: f64 = 1.5;

/// Non-null values of a numeric column, as f64
pub fn numeric_values(table: &AttritionTable, column: &str) -> Result<Vec<f64>, ReportError> {
    let col = table.frame().column(column)?.cast(&DataType::Float64)?;
    Ok(col.f64()?.into_iter().flatten().collect())
}

/// Split a numeric column by attrition flag: `(left, stayed)`.
///
/// Rows with an unknown flag or a null value belong to neither side.
pub fn split_by_attrition(
    table: &AttritionTable,
    column: &str,
) -> Result<(Vec<f64>, Vec<f64>), ReportError> {
    let values = table.frame().column(column)?.cast(&DataType::Float64)?;
    let flags = table.frame().column(ATTRITION)?;

    let mut left = Vec::new();
    let mut stayed = Vec::new();
    for (value, flag) in values.f64()?.into_iter().zip(flags.i32()?) {
        match (value, flag) {
            (Some(v), Some(1)) => left.push(v),
            (Some(v), Some(0)) => stayed.push(v),
            _ => {}
        }
    }

    Ok((left, stayed))
}

/// Fixed bin-count histogram over equal-width bins
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` edges, ascending
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` over their own range.
    ///
    /// A single distinct value is centred in a unit-wide range; an empty
    /// input gives zero counts over [0, 1].
    pub fn new(values: &[f64], bins: usize) -> Self {
        let (lo, hi) = value_range(values).unwrap_or((0.0, 1.0));
        Self::with_range(values, bins, lo, hi)
    }

    /// Bin `values` over a caller-provided range.
    ///
    /// The last bin is closed on the right; values outside the range and
    /// non-finite values are not counted. A non-finite range falls back
    /// to [0, 1].
    pub fn with_range(values: &[f64], bins: usize, lo: f64, hi: f64) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = if lo.is_finite() && hi.is_finite() {
            (lo, hi)
        } else {
            (0.0, 1.0)
        };
        let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, lo + 0.5) };
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];

        for &v in values {
            if !v.is_finite() || v < lo || v > hi {
                continue;
            }
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}

/// Smallest and largest finite value
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Gaussian kernel density of `values`, scaled to histogram counts.
///
/// Uses Scott's bandwidth and evaluates `points` positions over
/// `[lo, hi]`. Returns an empty curve when the bandwidth is zero
/// (fewer than two distinct values). Non-finite values are ignored.
pub fn kde_curve(values: &[f64], lo: f64, hi: f64, bin_width: f64, points: usize) -> Vec<(f64, f64)> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = values.len();
    if n < 2 || points < 2 || hi <= lo {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return Vec::new();
    }

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n as f64 * bin_width;
    let step = (hi - lo) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}

/// Five-number summary with whiskers, as drawn by a box plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Values beyond the whiskers
    pub outliers: usize,
    pub count: usize,
}

impl BoxSummary {
    /// Summarize `values`; `None` when there are none
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .filter(|&&v| v < low_fence || v > high_fence)
            .count();

        Some(Self {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
            count: sorted.len(),
        })
    }
}

/// Linear-interpolation quantile of an ascending slice
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Box summary of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBox {
    pub category: String,
    pub summary: BoxSummary,
}

/// Box summaries of `value` per distinct `category`, categories ascending.
///
/// Numeric categories sort by value, others lexically. Rows with a null
/// category or value are skipped.
pub fn box_summaries(
    table: &AttritionTable,
    category: &str,
    value: &str,
) -> Result<Vec<CategoryBox>, ReportError> {
    let categories = table.frame().column(category)?.cast(&DataType::String)?;
    let values = table.frame().column(value)?.cast(&DataType::Float64)?;

    let mut buckets: Vec<(String, Vec<f64>)> = Vec::new();
    for (cat, v) in categories.str()?.into_iter().zip(values.f64()?) {
        let (Some(cat), Some(v)) = (cat, v) else {
            continue;
        };
        match buckets.iter_mut().find(|(name, _)| name == cat) {
            Some((_, bucket)) => bucket.push(v),
            None => buckets.push((cat.to_string(), vec![v])),
        }
    }

    buckets.sort_by(|(a, _), (b, _)| compare_categories(a, b));

    Ok(buckets
        .into_iter()
        .filter_map(|(category, values)| {
            BoxSummary::from_values(&values).map(|summary| CategoryBox { category, summary })
        })
        .collect())
}

/// Numeric-aware ordering of category labels
pub fn compare_categories(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}
