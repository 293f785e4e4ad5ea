//! # Vitrine Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Parse arguments
//! 3. Load configuration from `VITRINE_*`
//! 4. Load catalog and order request, place the order

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use vitrine_storefront::state::ConfigState;
use vitrine_storefront::{init_tracing, run, Cli, Delivery};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    info!("Starting Vitrine storefront");

    let config = match ConfigState::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, config) {
        Ok(Delivery::Shared(payload)) => {
            println!("{}", payload.text);
            ExitCode::SUCCESS
        }
        Ok(Delivery::Downloaded(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            ExitCode::FAILURE
        }
    }
}
