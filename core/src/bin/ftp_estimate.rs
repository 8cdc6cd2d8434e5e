//! Feltbasert FTP-estimat fra en katalog med aktivitetsdata.
//!
//! ```text
//! ftp-estimate --data-dir ./data --days 60 --type road_biking --type virtual_ride
//! ```

use std::process::ExitCode;

use clap::Parser;
use ftpgraph_core::{load_config, print_ftp_report, FtpError, FtpEstimator, JsonDirStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ftp-estimate", about = "Estimate FTP from historical power/HR data")]
struct Args {
    /// Katalog med activities.json og details/<id>.json
    #[arg(long)]
    data_dir: String,

    /// Lookback-vindu i dager (overstyrer konfig)
    #[arg(long)]
    days: Option<u32>,

    /// Aktivitetstype (kan gjentas; overstyrer konfig)
    #[arg(long = "type")]
    types: Vec<String>,

    /// JSON-konfig (mangler filen brukes default)
    #[arg(long, default_value = "ftp_config.json")]
    config: String,

    /// Skriv resultatet som JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let days = args.days.unwrap_or(config.lookback_days);
    let types = if args.types.is_empty() {
        config.activity_types.clone()
    } else {
        args.types.clone()
    };

    println!("Filtering for activity types: {types:?}");
    let estimator = FtpEstimator::new(JsonDirStore::open(&args.data_dir), config);

    if args.json {
        return match estimator.estimate_ftp_json(days, Some(types.as_slice())) {
            Ok(s) => {
                println!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match estimator.estimate_ftp(days, Some(types.as_slice())) {
        Ok(est) => {
            print_ftp_report(&est);
            ExitCode::SUCCESS
        }
        Err(FtpError::InsufficientData { .. }) => {
            println!("Error: Not enough valid data points (>= 3 mins)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
