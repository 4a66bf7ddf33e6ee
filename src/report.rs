//! Fixed-width, colorized report rows.

use crate::types::{AppRecord, UNKNOWN};
use colored::Colorize;

pub const HEADER_RULE_WIDTH: usize = 70;

pub fn header() -> Vec<String> {
    vec![
        format!("{:<25} {:<15} {}", "Application", "Current", "Latest"),
        "-".repeat(HEADER_RULE_WIDTH),
    ]
}

/// The preliminary cluster-queried row. Same coloring as application rows
/// but never carries the `(latest)` suffix.
pub fn format_preliminary_row(name: &str, current: &str, latest: &str) -> String {
    format_row(name, current, latest, false)
}

pub fn format_record(record: &AppRecord) -> String {
    format_row(&record.name, &record.current, &record.latest, true)
}

/// Coloring: unknown latest prints plain, an exact current/latest match
/// prints green (suffixed `(latest)` for application rows), anything else
/// prints yellow with no suffix.
fn format_row(name: &str, current: &str, latest: &str, suffix: bool) -> String {
    let plain = format!("{name:<25} {current:<15} {latest}");
    if latest == UNKNOWN {
        plain
    } else if current == latest {
        if suffix {
            format!("{plain} (latest)").green().to_string()
        } else {
            plain.green().to_string()
        }
    } else {
        plain.yellow().to_string()
    }
}

pub fn legend() -> String {
    format!(
        "Legend: {} = up to date, {} = update available",
        "Green".green(),
        "Yellow".yellow()
    )
}
