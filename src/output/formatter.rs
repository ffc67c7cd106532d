use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::scoring::{RiskLevel, RiskResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals, e.g. "15.80"
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

fn format_level(level: RiskLevel, use_colors: bool) -> String {
    if !use_colors {
        return level.to_string();
    }
    match level {
        RiskLevel::Low => level.green().bold().to_string(),
        RiskLevel::Medium => level.yellow().bold().to_string(),
        RiskLevel::High => level.red().bold().to_string(),
    }
}

/// Format a result as a multi-line summary:
///
/// ```text
/// Organizer risk: 15.80 (LOW) [weighted_v1]
///   1. Existing business category reduces base risk due to operating history.
///   2. ...
/// ```
pub fn format_result(title: &str, result: &RiskResult, use_colors: bool) -> String {
    let score = format_score(result.risk_score);
    let level = format_level(result.risk_level, use_colors);

    let header = if use_colors {
        format!(
            "{}: {} ({}) {}",
            title.bold(),
            score.bold(),
            level,
            format!("[{}]", result.model_version).dimmed()
        )
    } else {
        format!(
            "{}: {} ({}) [{}]",
            title, score, level, result.model_version
        )
    };

    let mut lines = vec![header];
    for (idx, factor) in result.factors.iter().enumerate() {
        let index_str = format!("{:>3}.", idx + 1);
        if use_colors {
            lines.push(format!("{} {}", index_str.dimmed(), factor));
        } else {
            lines.push(format!("{} {}", index_str, factor));
        }
    }
    lines.join("\n")
}

/// Format a result as tab-separated values for scripting
/// Columns: score, level, model version (no headers, no colors)
pub fn format_tsv(result: &RiskResult) -> String {
    format!(
        "{}\t{}\t{}",
        format_score(result.risk_score),
        result.risk_level,
        result.model_version
    )
}
