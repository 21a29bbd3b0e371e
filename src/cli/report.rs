//! Report formatting and printing.
//!
//! Human output lists unused keys (and, with `--show-all-keys`, the used ones)
//! followed by a one-line summary. JSON output is a single pretty-printed
//! object. Both go to stdout.

use std::io::{self, Write};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::{
    config::{Config, OutputFormat},
    core::{Analysis, KeyUsage, Pattern, Summary, UsageStatus, VALUES_ACCESSOR},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Maximum number of locations to display per key.
const MAX_LOCATIONS_DISPLAY: usize = 3;

pub fn print(analysis: &Analysis, config: &Config) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match config.format {
        OutputFormat::Json => {
            let report = json_report(analysis, config.show_all_keys, timestamp());
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
        OutputFormat::Human => write_human(analysis, config.show_all_keys, &mut stdout)?,
    }
    Ok(())
}

/// Current UTC time, RFC 3339 with second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================
// Human Output
// ============================================================

pub fn write_human<W: Write>(
    analysis: &Analysis,
    show_all_keys: bool,
    writer: &mut W,
) -> io::Result<()> {
    if show_all_keys {
        let direct: Vec<&KeyUsage> = analysis.usages.iter().filter(|u| u.is_direct()).collect();
        writeln!(
            writer,
            "{}",
            format!("Directly used keys ({}):", direct.len()).bold()
        )?;
        for usage in direct {
            writeln!(
                writer,
                "  {}  {}",
                values_path(&usage.key).green(),
                format_locations(usage).dimmed()
            )?;
        }
        writeln!(writer)?;

        let via_pattern: Vec<(&KeyUsage, Pattern, &str)> = analysis
            .usages
            .iter()
            .filter_map(|usage| match &usage.status {
                UsageStatus::Pattern {
                    pattern,
                    parent_key,
                } => Some((usage, *pattern, parent_key.as_str())),
                _ => None,
            })
            .collect();
        writeln!(
            writer,
            "{}",
            format!("Keys used via patterns ({}):", via_pattern.len()).bold()
        )?;
        for (usage, pattern, parent_key) in via_pattern {
            let origin = if parent_key == usage.key {
                format!("[{pattern}]")
            } else {
                format!("[{pattern} via {}]", values_path(parent_key))
            };
            writeln!(
                writer,
                "  {}  {}",
                values_path(&usage.key).cyan(),
                origin.dimmed()
            )?;
        }
        writeln!(writer)?;
    }

    let unused: Vec<&KeyUsage> = analysis.usages.iter().filter(|u| !u.is_used()).collect();
    if unused.is_empty() {
        writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No unused keys found".green()
        )?;
    } else {
        writeln!(
            writer,
            "{}",
            format!("Completely unused keys ({}):", unused.len())
                .bold()
                .red()
        )?;
        for usage in unused {
            writeln!(writer, "  {}", values_path(&usage.key).yellow())?;
        }
    }
    writeln!(writer)?;

    print_summary(&analysis.summary(), writer)
}

fn print_summary<W: Write>(summary: &Summary, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "{} {} keys, {} used ({} direct, {} via patterns), {} unused",
        "Summary:".bold(),
        summary.total_keys,
        summary.used_keys,
        summary.direct_keys,
        summary.pattern_keys,
        summary.unused_keys
    )
}

fn values_path(key: &str) -> String {
    format!("{VALUES_ACCESSOR}{key}")
}

fn format_locations(usage: &KeyUsage) -> String {
    let locations = usage.location_strings();
    let shown = locations
        .iter()
        .take(MAX_LOCATIONS_DISPLAY)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if locations.len() > MAX_LOCATIONS_DISPLAY {
        format!(
            "{shown} (+{} more)",
            locations.len() - MAX_LOCATIONS_DISPLAY
        )
    } else {
        shown
    }
}

// ============================================================
// JSON Output
// ============================================================

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub timestamp: String,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directly_used_keys: Option<Vec<DirectKey<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_used_keys: Option<Vec<PatternKey<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_completely_keys: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_keys: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
pub struct DirectKey<'a> {
    pub key: &'a str,
    pub locations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PatternKey<'a> {
    pub key: &'a str,
    pub pattern: Pattern,
    pub parent_key: &'a str,
    pub locations: Vec<String>,
}

pub fn json_report(analysis: &Analysis, show_all_keys: bool, timestamp: String) -> JsonReport<'_> {
    let unused: Vec<&str> = analysis
        .usages
        .iter()
        .filter(|u| !u.is_used())
        .map(|u| u.key.as_str())
        .collect();

    let mut report = JsonReport {
        timestamp,
        summary: analysis.summary(),
        directly_used_keys: None,
        pattern_used_keys: None,
        unused_completely_keys: None,
        unused_keys: None,
    };

    if !show_all_keys {
        report.unused_keys = Some(unused);
        return report;
    }

    let mut direct = Vec::new();
    let mut via_pattern = Vec::new();
    for usage in &analysis.usages {
        match &usage.status {
            UsageStatus::Direct => direct.push(DirectKey {
                key: &usage.key,
                locations: usage.location_strings(),
            }),
            UsageStatus::Pattern {
                pattern,
                parent_key,
            } => via_pattern.push(PatternKey {
                key: &usage.key,
                pattern: *pattern,
                parent_key,
                locations: usage.location_strings(),
            }),
            UsageStatus::Unused => {}
        }
    }
    report.directly_used_keys = Some(direct);
    report.pattern_used_keys = Some(via_pattern);
    report.unused_completely_keys = Some(unused);
    report
}
