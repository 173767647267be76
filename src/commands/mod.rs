// Command handlers module
pub mod config;
pub mod monitor;
pub mod snapshot;
pub mod watch;

use anyhow::Result;
use clap::ArgMatches;

use crate::core::monitor::CollectorConfig;
use crate::core::Config;

/// Load stored configuration and apply per-run CLI overrides.
pub(crate) fn load_config_with_overrides(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::load()?;

    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.polling_interval_seconds = *interval;
    }
    if let Some(history) = matches.get_one::<usize>("history") {
        config.history_capacity = *history;
    }
    if let Some(pue) = matches.get_one::<f64>("pue") {
        config.power.pue = *pue;
    }
    if let Some(factor) = matches.get_one::<f64>("grid-factor") {
        config.grid_emission_factor = *factor;
    }

    Ok(config)
}

pub(crate) fn collector_config_from(matches: &ArgMatches) -> CollectorConfig {
    CollectorConfig {
        collect_gpu: !matches.get_flag("no-gpu"),
        ..Default::default()
    }
}
