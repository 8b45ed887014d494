//! Report module - computing and presenting the attrition report

pub mod blocks;
pub mod narrative;
pub mod palette;
pub mod plain;
pub mod preview;
pub mod tables;
pub mod widgets;

pub use blocks::*;
pub use narrative::*;
pub use palette::Palette;
pub use preview::Preview;

/// Format a percentage with two decimals, or "n/a" when undefined
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r),
        None => "n/a".to_string(),
    }
}
