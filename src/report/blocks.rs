//! Report blocks: what each section computes, and the computed panels
//!
//! Every section of the report is one entry of [`REPORT_BLOCKS`]. All
//! group-rate charts share one spec type and one compute path, as do the
//! box plots. Table order is display order.

use ratatui::style::Color;

use crate::pipeline::columns::{
    AGE, ATTRITION, BUSINESS_TRAVEL, DEPARTMENT, ENVIRONMENT_SATISFACTION, JOB_ROLE,
    JOB_SATISFACTION, MONTHLY_INCOME, WORK_LIFE_BALANCE, YEARS_AT_COMPANY,
};
use crate::pipeline::{
    box_summaries, grouped_attrition_rate, kde_curve, numeric_values, overall_attrition_rate,
    split_by_attrition, value_range, AttritionTable, CategoryBox, EncodingStats, GroupRate,
    Histogram, ReportError, KDE_POINTS,
};
use crate::report::Palette;

const RATE_AXIS: &str = "Attrition Rate (%)";
const BINARY_AXIS: &str = "Attrition (1 = Yes, 0 = No)";

/// Group-wise attrition rate rendered as a bar chart
#[derive(Debug, Clone, Copy)]
pub struct RateSpec {
    pub heading: &'static str,
    pub key: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub palette: Palette,
    /// Lay bars out horizontally so long category names stay readable
    pub long_labels: bool,
}

/// One histogram series source
#[derive(Debug, Clone, Copy)]
pub struct HistogramSpec {
    pub heading: &'static str,
    pub column: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub bins: usize,
    pub color: Color,
}

/// One box plot: attrition flag per category of an ordinal column
#[derive(Debug, Clone, Copy)]
pub struct BoxSpec {
    pub title: &'static str,
    pub category: &'static str,
    pub x_label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub enum BlockSpec {
    OverallRate {
        heading: &'static str,
    },
    Rate(RateSpec),
    Histogram(HistogramSpec),
    /// Same column split into "Attrition" / "No Attrition" series
    SplitHistogram(HistogramSpec),
    Boxes {
        heading: &'static str,
        plots: &'static [BoxSpec],
    },
}

impl BlockSpec {
    pub fn heading(&self) -> &'static str {
        match self {
            BlockSpec::OverallRate { heading } | BlockSpec::Boxes { heading, .. } => *heading,
            BlockSpec::Rate(spec) => spec.heading,
            BlockSpec::Histogram(spec) | BlockSpec::SplitHistogram(spec) => spec.heading,
        }
    }
}

const WORK_LIFE_BOX: BoxSpec = BoxSpec {
    title: "Impact of Work-Life Balance on Attrition",
    category: WORK_LIFE_BALANCE,
    x_label: "Work-Life Balance",
};

const SATISFACTION_BOXES: [BoxSpec; 3] = [
    BoxSpec {
        title: "Job Satisfaction vs. Attrition",
        category: JOB_SATISFACTION,
        x_label: "Job Satisfaction",
    },
    BoxSpec {
        title: "Environment Satisfaction vs. Attrition",
        category: ENVIRONMENT_SATISFACTION,
        x_label: "Environment Satisfaction",
    },
    BoxSpec {
        title: "Work-Life Balance vs. Attrition",
        category: WORK_LIFE_BALANCE,
        x_label: "Work-Life Balance",
    },
];

/// The report's analysis sections, in display order
pub const REPORT_BLOCKS: [BlockSpec; 9] = [
    BlockSpec::OverallRate {
        heading: "Overall Employee Attrition Rate",
    },
    BlockSpec::Rate(RateSpec {
        heading: "Attrition by Department",
        key: DEPARTMENT,
        title: "Attrition Rate by Department",
        x_label: "Department",
        palette: Palette::Coolwarm,
        long_labels: true,
    }),
    BlockSpec::Rate(RateSpec {
        heading: "Attrition by Business Travel",
        key: BUSINESS_TRAVEL,
        title: "Attrition Rate by Business Travel",
        x_label: "Business Travel",
        palette: Palette::Magma,
        long_labels: false,
    }),
    BlockSpec::Histogram(HistogramSpec {
        heading: "Monthly Income Distribution",
        column: MONTHLY_INCOME,
        title: "Monthly Income Distribution",
        x_label: "Monthly Income",
        bins: 30,
        color: Color::Blue,
    }),
    BlockSpec::Rate(RateSpec {
        heading: "Attrition by Job Role",
        key: JOB_ROLE,
        title: "Attrition Rate by Job Role",
        x_label: "Job Role",
        palette: Palette::Viridis,
        long_labels: true,
    }),
    BlockSpec::Boxes {
        heading: "Work-Life Balance vs. Attrition",
        plots: &[WORK_LIFE_BOX],
    },
    BlockSpec::SplitHistogram(HistogramSpec {
        heading: "Years at Company vs. Attrition",
        column: YEARS_AT_COMPANY,
        title: "Years at Company Distribution for Attrition vs. Non-Attrition",
        x_label: "Years at Company",
        bins: 20,
        color: Color::Red,
    }),
    BlockSpec::Boxes {
        heading: "Satisfaction Scores Analysis",
        plots: &SATISFACTION_BOXES,
    },
    BlockSpec::Histogram(HistogramSpec {
        heading: "Age Distribution",
        column: AGE,
        title: "Age Distribution of Employees",
        x_label: "Age",
        bins: 30,
        color: Color::Green,
    }),
];

/// Computed overall rate
#[derive(Debug, Clone)]
pub struct OverallPanel {
    pub heading: &'static str,
    pub rate: Option<f64>,
    pub rows: usize,
    pub stats: EncodingStats,
}

#[derive(Debug, Clone)]
pub struct RatePanel {
    pub spec: RateSpec,
    pub y_label: &'static str,
    pub groups: Vec<GroupRate>,
}

#[derive(Debug, Clone)]
pub struct HistogramSeries {
    /// Legend entry; single-series charts have none
    pub label: Option<&'static str>,
    pub color: Color,
    pub histogram: Histogram,
    pub kde: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct HistogramPanel {
    pub heading: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<HistogramSeries>,
}

#[derive(Debug, Clone)]
pub struct BoxPlot {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub palette: Palette,
    pub boxes: Vec<CategoryBox>,
}

#[derive(Debug, Clone)]
pub struct BoxPanel {
    pub heading: &'static str,
    pub plots: Vec<BoxPlot>,
}

/// A computed, renderable report section
#[derive(Debug, Clone)]
pub enum Panel {
    Overall(OverallPanel),
    Rate(RatePanel),
    Histogram(HistogramPanel),
    Boxes(BoxPanel),
}

impl Panel {
    pub fn heading(&self) -> &'static str {
        match self {
            Panel::Overall(p) => p.heading,
            Panel::Rate(p) => p.spec.heading,
            Panel::Histogram(p) => p.heading,
            Panel::Boxes(p) => p.heading,
        }
    }
}

/// Compute one report section from the encoded table
pub fn compute_panel(table: &AttritionTable, spec: &BlockSpec) -> Result<Panel, ReportError> {
    tracing::debug!(section = spec.heading(), "computing report section");

    let panel = match *spec {
        BlockSpec::OverallRate { heading } => Panel::Overall(OverallPanel {
            heading,
            rate: overall_attrition_rate(table)?,
            rows: table.height(),
            stats: table.stats().clone(),
        }),
        BlockSpec::Rate(spec) => Panel::Rate(RatePanel {
            spec,
            y_label: RATE_AXIS,
            groups: grouped_attrition_rate(table, spec.key)?,
        }),
        BlockSpec::Histogram(spec) => {
            let values = numeric_values(table, spec.column)?;
            let histogram = Histogram::new(&values, spec.bins);
            let series = build_series(None, spec.color, &values, histogram);
            Panel::Histogram(histogram_panel(&spec, vec![series]))
        }
        BlockSpec::SplitHistogram(spec) => {
            let (left, stayed) = split_by_attrition(table, spec.column)?;
            let all: Vec<f64> = left.iter().chain(stayed.iter()).copied().collect();
            let (lo, hi) = value_range(&all).unwrap_or((0.0, 1.0));

            let left_hist = Histogram::with_range(&left, spec.bins, lo, hi);
            let stayed_hist = Histogram::with_range(&stayed, spec.bins, lo, hi);
            let series = vec![
                build_series(Some("Attrition"), spec.color, &left, left_hist),
                build_series(Some("No Attrition"), Color::Blue, &stayed, stayed_hist),
            ];
            Panel::Histogram(histogram_panel(&spec, series))
        }
        BlockSpec::Boxes { heading, plots } => {
            let plots = plots
                .iter()
                .map(|plot| {
                    Ok(BoxPlot {
                        title: plot.title,
                        x_label: plot.x_label,
                        y_label: BINARY_AXIS,
                        palette: Palette::Coolwarm,
                        boxes: box_summaries(table, plot.category, ATTRITION)?,
                    })
                })
                .collect::<Result<Vec<_>, ReportError>>()?;
            Panel::Boxes(BoxPanel { heading, plots })
        }
    };

    Ok(panel)
}

/// Compute every section, failing on the first error
pub fn compute_all(table: &AttritionTable) -> Result<Vec<Panel>, ReportError> {
    REPORT_BLOCKS
        .iter()
        .map(|spec| compute_panel(table, spec))
        .collect()
}

fn build_series(
    label: Option<&'static str>,
    color: Color,
    values: &[f64],
    histogram: Histogram,
) -> HistogramSeries {
    let (lo, hi) = histogram.range();
    let kde = match value_range(values) {
        Some((min, max)) => kde_curve(values, min.max(lo), max.min(hi), histogram.bin_width(), KDE_POINTS),
        None => Vec::new(),
    };

    HistogramSeries {
        label,
        color,
        histogram,
        kde,
    }
}

fn histogram_panel(spec: &HistogramSpec, series: Vec<HistogramSeries>) -> HistogramPanel {
    HistogramPanel {
        heading: spec.heading,
        title: spec.title,
        x_label: spec.x_label,
        y_label: "Frequency",
        series,
    }
}
