//! sui-call: type-checked Move call arguments from the command line
//!
//! ## Commands
//!
//! - **signature**: Show the user-facing parameters of a deployed function
//! - **check**: Validate and encode values against explicit parameter types
//! - **call**: Fetch a signature, validate values, and print the prepared call
//!
//! ## Example Usage
//!
//! ```bash
//! # Inspect a function
//! sui-call signature 0x2::coin::split
//!
//! # Offline check against an object fixture
//! sui-call check --params u64 '&0x2::clock::Clock' --args '["100", "0x6"]' --objects objects.json
//!
//! # Dry-run a call on testnet
//! sui-call --network testnet call 0x2::coin::split --type-arg 0x2::sui::SUI --args '["0x...", "1000"]'
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sui_call_studio::logging::init_tracing;
use sui_call_studio::EngineConfig;

mod call_cli;

use call_cli::{call::CallCmd, check::CheckCmd, output::format_error, signature::SignatureCmd};

#[derive(Parser)]
#[command(
    name = "sui-call",
    author,
    version,
    about = "Validate and encode Sui Move call arguments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (see EngineConfig)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network: mainnet, testnet, devnet
    #[arg(long, global = true)]
    network: Option<String>,

    /// GraphQL endpoint override
    #[arg(long, global = true)]
    graphql_endpoint: Option<String>,

    /// Accept any digit string for integer parameters
    #[arg(long, global = true)]
    no_range_checks: bool,

    /// Validate parameters one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Retries for transient object lookup failures
    #[arg(long, global = true)]
    retries: Option<usize>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parameters of a deployed function
    Signature(SignatureCmd),

    /// Validate and encode values against explicit types
    Check(CheckCmd),

    /// Validate values for a deployed function and print the prepared call
    Call(CallCmd),
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        config.apply_env();

        if let Some(network) = &self.network {
            config.network = network.clone();
        }
        if let Some(endpoint) = &self.graphql_endpoint {
            config.graphql_endpoint = Some(endpoint.clone());
        }
        if self.no_range_checks {
            config.check_ranges = false;
        }
        if self.sequential {
            config.concurrent_validation = false;
        }
        if let Some(retries) = self.retries {
            config.retry.retries = retries;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, false)?;

    let result = match cli.engine_config() {
        Ok(config) => match &cli.command {
            Commands::Signature(cmd) => cmd.execute(&config, cli.json).await,
            Commands::Check(cmd) => cmd.execute(&config, cli.json).await,
            Commands::Call(cmd) => cmd.execute(&config, cli.json).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        eprintln!("{}", format_error(e, cli.json));
        std::process::exit(1);
    }
    Ok(())
}
