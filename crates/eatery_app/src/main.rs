mod cli;
mod platform;

use clap::Parser;
use engine_logging::engine_info;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = cli.app_config()?;

    engine_logging::initialize(config.log_destination, config.log_level, &config.log_file);
    engine_info!(
        "Starting eatery: listing={} page_size={}",
        config.engine.endpoints.listing_base_url,
        config.page_size
    );

    platform::run(config, cli.command.unwrap_or(Command::Browse))
}
