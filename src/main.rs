use clap::Parser;
use log::{error, info, warn};
use playtime::configuration::config::{CliArgs, Config};
use playtime::controller::Controller;

fn main() {
    let args = CliArgs::parse();

    // https://docs.rs/env_logger/latest/env_logger/
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    info!("Importing configuration");

    let config = Config::resolve(&args).unwrap_or_else(|e| {
        error!("Unable to import configuration: {}", e);
        std::process::exit(1);
    });

    info!("Configuration imported successfully");

    let mut controller = Controller::new(config).unwrap_or_else(|e| {
        error!("Unable to create a controller instance: {}, exiting...", e);
        std::process::exit(1);
    });

    let summary = controller.run().unwrap_or_else(|e| {
        error!("Analysis aborted: {}", e);
        std::process::exit(1);
    });

    info!(
        "Processed {} file(s), {} line(s), {} player(s)",
        summary.files_processed, summary.lines_processed, summary.players
    );
    if summary.unmatched_leaves > 0 {
        warn!(
            "{} leave event(s) had no recorded join and were not credited",
            summary.unmatched_leaves
        );
    }
    if !summary.still_online.is_empty() {
        info!(
            "Open sessions not credited: {}",
            summary.still_online.join(", ")
        );
    }
}
