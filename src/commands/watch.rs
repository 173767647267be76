//! Plain-console watch loop.
//!
//! Subscribes to the tick channel and redraws a full dashboard frame per
//! tick, or emits NDJSON with `--json` for scripting. Ctrl-C signals the
//! scheduler's shutdown handle, which also wakes a reader blocked between
//! ticks; the in-flight tick may be lost, which is fine.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::core::monitor::{Monitor, MonitorRuntime, TickUpdate};
use crate::ui::{render_failure_plain, render_report_plain, report_to_json};

use super::{collector_config_from, load_config_with_overrides};

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = load_config_with_overrides(matches)?;
    let json_output = matches.get_flag("json");

    let monitor = Monitor::new(&config, collector_config_from(matches));
    let mut runtime = MonitorRuntime::new(
        monitor,
        Duration::from_secs(config.polling_interval_seconds.max(1)),
    )
    .context("Failed to start tick scheduler")?;

    let shutdown = runtime.shutdown_handle();
    ctrlc::set_handler(move || shutdown.shutdown())
        .context("Failed to install Ctrl-C handler")?;

    while let Some(update) = runtime.next_update() {
        if json_output {
            if !matches!(update.as_ref(), TickUpdate::Pending) {
                println!("{}", report_to_json(update.as_ref())?);
            }
            continue;
        }

        match update.as_ref() {
            TickUpdate::Pending => {}
            TickUpdate::Report(report) => {
                execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
                    .context("Failed to clear terminal")?;
                render_report_plain(report);
            }
            TickUpdate::CollectionFailed { timestamp, error } => {
                render_failure_plain(*timestamp, error);
            }
        }
    }

    runtime.shutdown();

    if !json_output {
        println!("\nMonitoring stopped.");
    }

    Ok(())
}
