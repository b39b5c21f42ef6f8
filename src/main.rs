// Building Topology - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ BUILDING_DIR=./buildings ./target/release/building-topology find-path lobby lab
// ```
//
// Or against another building with verbose logging:
//
// ```console
// $ ./target/release/building-topology --building-dir ./buildings --building HQ --verbose read
// ```

use anyhow::{anyhow, Context};
use building_topology::service::{execute, LoggingConfig};
use building_topology::types::config::{AppConfig, CliArgs};
use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match AppConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Run the requested command, returning whether it succeeded
fn run(args: CliArgs) -> anyhow::Result<bool> {
    // Load configuration from CLI arguments and optional config file
    let config =
        AppConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;

    let _guard = init_logging(&args, &config)?;
    info!("Starting building topology tool");

    config.validate().context("Configuration validation failed")?;
    let store = config.store()?;

    let Some(command) = args.command else {
        return Err(anyhow!("No command given (see --help)"));
    };

    let output = execute(&store, &config.default_building, &command);
    if output.success {
        println!("{}", output.text);
    } else {
        eprintln!("{}", output.text);
    }
    Ok(output.success)
}

/// Initialize logging based on CLI flags and configuration
fn init_logging(args: &CliArgs, config: &AppConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let mut logging = if args.debug {
        LoggingConfig::debug()
    } else if args.verbose {
        LoggingConfig::verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::cli()
    };

    if config.json_logs {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &config.log_directory {
        logging = logging.with_file_logging(dir.clone());
    }

    logging.init().map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
