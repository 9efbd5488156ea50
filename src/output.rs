//! Report rendering. Rendering functions return plain strings so they can be
//! tested; printing adds the section headers and writes to stdout.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::ec2::InstanceRecord;
use crate::report;

/// One line per instance: id, type, state, elapsed time since launch.
pub fn render_instance_lines(records: &[InstanceRecord], now: DateTime<Utc>) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            format!(
                "  {:<20} {:<14} {:<14} {}",
                r.id,
                r.instance_type,
                r.state,
                report::format_uptime(report::uptime_seconds(r, now))
            )
        })
        .collect()
}

/// One line per spot instance: id, type, state.
pub fn render_spot_instance_lines(records: &[InstanceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| format!("  {:<20} {:<14} {}", r.id, r.instance_type, r.state))
        .collect()
}

/// One line per instance type, sorted by type name for stable output.
pub fn render_average_lines(averages: &HashMap<String, String>) -> Vec<String> {
    let mut types: Vec<&String> = averages.keys().collect();
    types.sort();
    types
        .into_iter()
        .map(|t| format!("  {:<16} {}", t, averages[t]))
        .collect()
}

/// One line per instance type, sorted by type name for stable output.
pub fn render_interruption_lines(counts: &HashMap<String, u64>) -> Vec<String> {
    let mut types: Vec<&String> = counts.keys().collect();
    types.sort();
    types
        .into_iter()
        .map(|t| format!("  {:<16} {}", t, counts[t]))
        .collect()
}

pub fn print_all_instances(records: &[InstanceRecord], now: DateTime<Utc>) {
    print_section_header("All Instances");
    print_lines(render_instance_lines(records, now));
}

pub fn print_average_uptimes(averages: &HashMap<String, String>) {
    print_section_header("Average Uptime by Type");
    print_lines(render_average_lines(averages));
}

pub fn print_spot_instances(records: &[InstanceRecord]) {
    print_section_header("Spot Instances");
    print_lines(render_spot_instance_lines(records));
}

pub fn print_interruptions(counts: &HashMap<String, u64>) {
    print_section_header("Spot Interruptions");
    // Count of interrupted instance types, not total interruptions
    println!("  Count: {}", counts.len().to_string().yellow());
    if !counts.is_empty() {
        for line in render_interruption_lines(counts) {
            println!("{}", line);
        }
    }
}

fn print_section_header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "-".repeat(40));
}

fn print_lines(lines: Vec<String>) {
    if lines.is_empty() {
        println!("  (none)");
        return;
    }
    for line in lines {
        println!("{}", line);
    }
}
