//! Configuration command handlers.

use anyhow::Result;
use clap::ArgMatches;
use colored::*;

use crate::core::Config;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => execute_show(),
        Some(("set", sub_matches)) => execute_set(sub_matches),
        _ => {
            println!("Use 'ecotop config --help' for more information.");
            Ok(())
        }
    }
}

fn execute_show() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Monitoring".white().bold());
    print_entry("polling-interval-seconds", config.polling_interval_seconds);
    print_entry("history-capacity", config.history_capacity);
    print_entry("min-samples", config.min_samples);
    print_entry("anomaly-factor", config.anomaly_factor);

    println!();
    println!("{}", "Power model".white().bold());
    print_entry("cpu-coefficient-w", config.power.cpu_coefficient_w);
    print_entry(
        "cpu-frequency-fallback-ghz",
        config.power.cpu_frequency_fallback_ghz,
    );
    print_entry("memory-w-per-gb", config.power.memory_w_per_gb);
    print_entry("disk-active-w", config.power.disk_active_w);
    print_entry("disk-idle-w", config.power.disk_idle_w);
    print_entry("pue", config.power.pue);

    println!();
    println!("{}", "Emissions".white().bold());
    print_entry("grid-emission-factor", config.grid_emission_factor);

    Ok(())
}

fn print_entry(key: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{:<28}", key).cyan(), value);
}

fn execute_set(matches: &ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .expect("key is a required argument");
    let value = matches
        .get_one::<String>("value")
        .expect("value is a required argument");

    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    println!("{} {} = {}", "Saved:".green().bold(), key.cyan(), value);

    Ok(())
}
