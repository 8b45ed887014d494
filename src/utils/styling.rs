//! Terminal styling utilities for status lines around the report

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::{DatasetStats, EncodingStats};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

/// Print the application banner to stderr
pub fn print_banner(version: &str, input: &Path) {
    eprintln!();
    eprintln!(
        "  {} {}",
        style("churnscope").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    eprintln!("  {}{}", FOLDER, truncate_path(input, 60));
}

/// Print dataset statistics after loading
pub fn print_dataset_stats(stats: &DatasetStats) {
    eprintln!(
        "  {} {} rows × {} columns ({:.2} MB)",
        style("✧").cyan(),
        style(stats.rows).yellow(),
        style(stats.cols).yellow(),
        stats.memory_mb
    );
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("  {}{}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("  {}{}", WARN, style(message).yellow());
}

/// Print a fatal error message
pub fn print_error(message: &str) {
    eprintln!();
    eprintln!("  {} {}", style("✗").red().bold(), style(message).red().bold());
    eprintln!();
}

/// Warn about attrition values that were stored as missing
pub fn print_encoding_warning(stats: &EncodingStats) {
    if !stats.has_unknown() {
        return;
    }
    let values: Vec<&str> = stats.unknown_values.iter().map(String::as_str).collect();
    print_warning(&format!(
        "{} of {} row(s) have an Attrition value other than Yes/No ({}); treated as missing",
        stats.unknown,
        stats.total(),
        values.join(", ")
    ));
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}
