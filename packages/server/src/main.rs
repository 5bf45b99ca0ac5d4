#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! House price dashboard entry point.
//!
//! With no subcommand, runs the prediction form interactively in the
//! terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use house_price_housing_models::{HOUSING_MEDIAN_AGE_DEFAULT, HousingInput, MEDIAN_INCOME_DEFAULT};
use house_price_prediction::{ArtifactPaths, ArtifactStore, paths, predict_price};
use house_price_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(name = "house_price_server", about = "House price dashboard")]
struct Cli {
    /// Directory holding `housing.csv`, `regions.geojson` and `model.json`
    /// (overrides `HOUSE_PRICE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server and dashboard page
    Serve,
    /// Predict a single price and print it
    Predict {
        /// County name, e.g. `Alameda`
        #[arg(long)]
        region: String,
        /// Housing median age in years (0-50)
        #[arg(long, default_value_t = HOUSING_MEDIAN_AGE_DEFAULT)]
        age: u8,
        /// Median income in thousands of US$ (5-100, step 5)
        #[arg(long, default_value_t = MEDIAN_INCOME_DEFAULT)]
        income: u8,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(paths::data_dir_from_env);
    log::debug!("Using data directory {}", data_dir.display());
    let store = Arc::new(ArtifactStore::new(ArtifactPaths::from_data_dir(&data_dir)));

    let Some(command) = cli.command else {
        return house_price_server::interactive::run(&store);
    };

    match command {
        Commands::Serve => {
            actix_web::rt::System::new().block_on(run_server(ServerConfig::from_env(), store))?;
        }
        Commands::Predict {
            region,
            age,
            income,
        } => {
            let input = HousingInput::new(age, income)?;
            let (_, prediction) = predict_price(&store, &region, input)?;
            println!("{}", prediction.display);
        }
    }

    Ok(())
}
