use anyhow::Result;
use clap::{Arg, Command};

fn shared_args() -> Vec<Arg> {
    vec![
        Arg::new("interval")
            .short('i')
            .long("interval")
            .value_name("SECONDS")
            .help("Seconds between collection ticks")
            .value_parser(clap::value_parser!(u64).range(1..)),
        Arg::new("history")
            .long("history")
            .value_name("RECORDS")
            .help("Rolling-window size for trend and anomaly analysis")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("pue")
            .long("pue")
            .value_name("RATIO")
            .help("Power Usage Effectiveness multiplier for facility draw")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("grid-factor")
            .long("grid-factor")
            .value_name("G_PER_KWH")
            .help("Grid carbon intensity in grams of CO2 per kWh")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("no-gpu")
            .long("no-gpu")
            .help("Skip GPU detection and readings")
            .action(clap::ArgAction::SetTrue),
    ]
}

fn main() -> Result<()> {
    ecotop::init_logging();

    let matches = Command::new("ecotop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Estimates host power draw and carbon emissions from live resource usage")
        .subcommand(
            Command::new("monitor")
                .about("Real-time TUI dashboard")
                .args(shared_args()),
        )
        .subcommand(
            Command::new("watch")
                .about("Refreshing plain-console dashboard")
                .args(shared_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit one JSON line per tick instead of a dashboard")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Collect a single tick, print it, and exit")
                .args(shared_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the tick report as JSON")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or change stored configuration")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the active configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(Arg::new("key").help("Configuration key").required(true))
                        .arg(Arg::new("value").help("New value").required(true)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("monitor", sub_matches)) => ecotop::commands::monitor::execute(sub_matches),
        Some(("watch", sub_matches)) => ecotop::commands::watch::execute(sub_matches),
        Some(("snapshot", sub_matches)) => ecotop::commands::snapshot::execute(sub_matches),
        Some(("config", sub_matches)) => ecotop::commands::config::execute(sub_matches),
        _ => {
            println!("Welcome to ecotop!");
            println!("Use 'ecotop --help' for more information.");
            Ok(())
        }
    }
}
