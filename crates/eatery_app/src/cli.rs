use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eatery_core::DEFAULT_PAGE_SIZE;
use eatery_engine::{
    EngineConfig, FeedEndpoints, ProbeSettings, DEFAULT_LATITUDE, DEFAULT_LISTING_BASE_URL,
    DEFAULT_LONGITUDE, DEFAULT_MENU_BASE_URL, DEFAULT_PROBE_ADDRESS,
};
use engine_logging::LogDestination;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "eatery",
    version,
    about = "Browse restaurants and their menus from the delivery feed"
)]
pub struct Cli {
    #[command(flatten)]
    pub feed: FeedArgs,

    #[command(flatten)]
    pub logging: LogArgs,

    /// How views are printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EATERY_FORMAT", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one page of the restaurant listing.
    List {
        /// Case-insensitive substring of the restaurant name.
        #[arg(long)]
        search: Option<String>,
        /// Only restaurants rated above 4.
        #[arg(long)]
        top_rated: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Print the menu of one restaurant.
    Menu {
        restaurant_id: String,
    },
    /// Interactive listing and menu browser (default).
    Browse,
}

#[derive(Debug, Args)]
pub struct FeedArgs {
    #[arg(long, env = "EATERY_LAT", default_value_t = DEFAULT_LATITUDE, global = true)]
    pub lat: f64,

    #[arg(long, env = "EATERY_LNG", default_value_t = DEFAULT_LONGITUDE, global = true)]
    pub lng: f64,

    #[arg(long, env = "EATERY_LISTING_URL", default_value = DEFAULT_LISTING_BASE_URL, global = true)]
    pub listing_url: String,

    /// The restaurant id is appended to this URL.
    #[arg(long, env = "EATERY_MENU_URL", default_value = DEFAULT_MENU_BASE_URL, global = true)]
    pub menu_url: String,

    #[arg(
        long,
        env = "EATERY_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE as u32,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    pub page_size: u32,

    /// `host:port` used to detect connectivity.
    #[arg(long, env = "EATERY_PROBE_ADDRESS", default_value = DEFAULT_PROBE_ADDRESS, global = true)]
    pub probe_address: String,

    #[arg(long, env = "EATERY_PROBE_INTERVAL_SECS", default_value_t = 15, global = true)]
    pub probe_interval_secs: u64,

    /// Skip connectivity checks, at start-up and later; the network is
    /// assumed reachable.
    #[arg(long, env = "EATERY_NO_PROBE", global = true)]
    pub no_probe: bool,
}

#[derive(Debug, Args)]
pub struct LogArgs {
    #[arg(long = "log", value_enum, env = "EATERY_LOG", default_value_t = LogTarget::Terminal, global = true)]
    pub target: LogTarget,

    #[arg(long, env = "EATERY_LOG_FILE", default_value = "./eatery.log", global = true)]
    pub log_file: PathBuf,

    #[arg(long, env = "EATERY_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything the front-end needs, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub page_size: usize,
    pub format: OutputFormat,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Cli {
    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        let endpoints = FeedEndpoints {
            listing_base_url: self.feed.listing_url.clone(),
            menu_base_url: self.feed.menu_url.clone(),
            latitude: self.feed.lat,
            longitude: self.feed.lng,
        };
        endpoints
            .listing_url()
            .with_context(|| format!("invalid listing URL {:?}", self.feed.listing_url))?;

        let probe = ProbeSettings {
            enabled: !self.feed.no_probe,
            address: self.feed.probe_address.clone(),
            interval: Duration::from_secs(self.feed.probe_interval_secs.max(1)),
            ..ProbeSettings::default()
        };

        Ok(AppConfig {
            engine: EngineConfig {
                endpoints,
                probe,
                ..EngineConfig::default()
            },
            page_size: self.feed.page_size as usize,
            format: self.format,
            log_destination: match self.logging.target {
                LogTarget::Terminal => LogDestination::Terminal,
                LogTarget::File => LogDestination::File,
                LogTarget::Both => LogDestination::Both,
                LogTarget::Off => LogDestination::Off,
            },
            log_level: self.logging.log_level,
            log_file: self.logging.log_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_browse_with_standard_endpoints() {
        let cli = Cli::try_parse_from(["eatery"]).unwrap();
        assert!(cli.command.is_none());

        let config = cli.app_config().unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.engine.endpoints, FeedEndpoints::default());
        assert_eq!(config.engine.probe, ProbeSettings::default());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn list_options_and_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "eatery",
            "list",
            "--search",
            "pizza",
            "--top-rated",
            "--page",
            "2",
            "--page-size",
            "5",
            "--format",
            "json",
            "--no-probe",
        ])
        .unwrap();

        match &cli.command {
            Some(Command::List {
                search,
                top_rated,
                page,
            }) => {
                assert_eq!(search.as_deref(), Some("pizza"));
                assert!(*top_rated);
                assert_eq!(*page, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
        let config = cli.app_config().unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.engine.probe.enabled);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["eatery", "--page-size", "0"]).is_err());
    }

    #[test]
    fn invalid_listing_url_is_reported() {
        let cli = Cli::try_parse_from(["eatery", "--listing-url", "nope"]).unwrap();
        assert!(cli.app_config().is_err());
    }
}
