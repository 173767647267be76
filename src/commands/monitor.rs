//! TUI dashboard command handler.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::monitor::Monitor;
use crate::ui::monitor_tui::run_monitor_app;

use super::{collector_config_from, load_config_with_overrides};

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = load_config_with_overrides(matches)?;
    let monitor = Monitor::new(&config, collector_config_from(matches));

    run_monitor_app(monitor, config.polling_interval_seconds * 1000)
        .context("Failed to run monitor dashboard")
}
