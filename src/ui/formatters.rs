//! Plain-console rendering of tick reports.
//!
//! Mirrors the classic refreshing-dashboard layout: utilization line,
//! power section, environmental-impact section. Watt figures are rounded
//! to one decimal for display only; the underlying estimates keep full
//! precision.

use colored::*;

use crate::core::monitor::{TickReport, TickUpdate};
use crate::error::Result;

/// Print one report as a full dashboard frame
pub fn render_report_plain(report: &TickReport) {
    let snapshot = &report.snapshot;
    let power = &report.power;
    let emissions = &report.emissions;

    println!("{}", "=== ECOTOP SYSTEM MONITOR ===".cyan().bold());

    println!(
        "Host: {} | Uptime: {}",
        snapshot.hostname.as_deref().unwrap_or("unknown"),
        format_uptime(snapshot.uptime_seconds),
    );

    let freq = match snapshot.cpu_frequency_mhz {
        Some(mhz) => format!("{} MHz", mhz),
        None => "n/a".to_string(),
    };
    println!(
        "CPU: {}% @ {} | Memory: {:.1}% ({:.1}/{:.1} GB) | Disk: {:.1}/{:.1} GB",
        format!("{:.1}", snapshot.cpu_usage_percent).yellow(),
        freq,
        snapshot.memory_percent,
        snapshot.memory_used_gb,
        snapshot.memory_total_gb,
        snapshot.disk_used_gb,
        snapshot.disk_total_gb,
    );
    println!(
        "Network: {:.1} MB sent / {:.1} MB received",
        snapshot.network_sent_mb, snapshot.network_received_mb
    );

    for gpu in &snapshot.gpus {
        let temp = gpu
            .temperature_c
            .map(|t| format!(" | {}C", t))
            .unwrap_or_default();
        println!(
            "GPU {}: {:.1}% load | {:.1}% memory{}",
            gpu.name, gpu.load_percent, gpu.memory_percent, temp
        );
    }

    println!();
    println!("{}", "[POWER USAGE]".white().bold());
    println!(
        "CPU: {}W | RAM: {}W | Disk: {}W",
        format!("{:.1}", power.cpu_watts).green(),
        format!("{:.1}", power.memory_watts).green(),
        format!("{:.1}", power.disk_watts).green(),
    );
    println!(
        "Total IT: {}W | Facility: {}W (PUE: {})",
        format!("{:.1}", power.it_total_watts).green().bold(),
        format!("{:.1}", power.facility_watts).green().bold(),
        power.pue,
    );

    println!();
    println!("{}", "[ENVIRONMENTAL IMPACT]".white().bold());
    println!(
        "CO2: {}g/h | {}kg/day | {}t/year",
        format!("{:.1}", emissions.hourly_g).magenta(),
        format!("{:.2}", emissions.daily_kg).magenta(),
        format!("{:.3}", emissions.annual_tonnes).magenta(),
    );

    println!();
    match report.anomaly {
        Some(true) => println!(
            "{}",
            "POWER SPIKE: draw is above 1.3x the rolling mean"
                .red()
                .bold()
        ),
        Some(false) => println!("{}", "Power draw within normal range".dimmed()),
        None => println!("{}", "Collecting baseline (anomaly check warming up)".dimmed()),
    }
}

/// Render uptime seconds as `NdD HH:MM:SS`, days omitted below one day
pub(crate) fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3600;
    let minutes = seconds % 3600 / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

/// Print a recoverable collection failure for this tick
pub fn render_failure_plain(timestamp: i64, error: &str) {
    println!(
        "{} {} (tick at {} skipped, monitoring continues)",
        "Collection failed:".red().bold(),
        error,
        timestamp
    );
}

/// Serialize one tick outcome as a JSON line for scripting
pub fn report_to_json(update: &TickUpdate) -> Result<String> {
    match update {
        TickUpdate::Report(report) => Ok(serde_json::to_string(report)?),
        TickUpdate::CollectionFailed { timestamp, error } => Ok(serde_json::to_string(
            &serde_json::json!({ "error": error, "timestamp": timestamp }),
        )?),
        TickUpdate::Pending => Ok(serde_json::to_string(&serde_json::json!({
            "status": "pending"
        }))?),
    }
}
