//! CampusSpot server — application entry point.

use std::process;

use campusspot_server::{
    config::Config,
    run_seed,
    seed::{DEFAULT_REVIEW_COUNT, DEFAULT_SPOT_COUNT},
    start_server,
};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "campusspot=info,campusspot_server=info,campusspot_db=info,tower_http=info";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server (default)
    Serve,
    /// Fill the database with generated demo spots and reviews
    Seed {
        /// Number of spots to generate
        #[arg(long, default_value_t = DEFAULT_SPOT_COUNT)]
        spots: usize,

        /// Number of reviews to generate
        #[arg(long, default_value_t = DEFAULT_REVIEW_COUNT)]
        reviews: usize,
    },
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();

    info!("CampusSpot v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => start_server(config).await,
        Command::Seed { spots, reviews } => run_seed(config, spots, reviews).await.map(|_| ()),
    };

    if let Err(e) = result {
        error!("Fatal error: {e}");
        process::exit(1);
    }
}
