//! One-shot snapshot command.

use anyhow::{anyhow, Result};
use clap::ArgMatches;

use crate::core::monitor::{Monitor, TickUpdate};
use crate::ui::{render_report_plain, report_to_json};

use super::{collector_config_from, load_config_with_overrides};

/// Collect a single tick, print it, and exit.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = load_config_with_overrides(matches)?;
    let json_output = matches.get_flag("json");

    let mut monitor = Monitor::new(&config, collector_config_from(matches));

    // CPU usage needs one measurement interval between refreshes
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    match monitor.tick() {
        TickUpdate::Report(report) => {
            if json_output {
                println!("{}", report_to_json(&TickUpdate::Report(report))?);
            } else {
                render_report_plain(&report);
            }
            Ok(())
        }
        TickUpdate::CollectionFailed { error, .. } => {
            Err(anyhow!("Metric collection failed: {}", error))
        }
        TickUpdate::Pending => unreachable!("tick never yields Pending"),
    }
}
