// Copyright (C) 2025-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use delivery_time_moving_average::{
    config::{load_config, ConfigOverrides, LoggingConfig},
    error::CliError,
    run,
};
use std::{path::PathBuf, process::ExitCode, str::FromStr};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Calculate moving average of translation delivery time",
    long_about = None
)]
struct Cli {
    /// Input JSON Lines file path
    #[clap(long = "input_file", visible_alias = "input-file")]
    input_file: Option<PathBuf>,

    /// Window size for the moving average calculation, in minutes
    #[clap(
        long = "window_size",
        visible_alias = "window-size",
        allow_negative_numbers = true
    )]
    window_size: Option<i64>,

    /// JSON Lines output file path, if not specified
    /// output will be directed to stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Optional YAML configuration file, command line options take precedence
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[clap(long)]
    log_level: Option<String>,
}

fn init_tracing(level: &str) -> Result<(), CliError> {
    let level = Level::from_str(level).map_err(|_| CliError::InvalidLogLevel(level.to_string()))?;
    // Logs go to stderr, stdout is reserved for the results
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run_cli(cli: Cli) -> Result<(), CliError> {
    let overrides = ConfigOverrides {
        input_file: cli.input_file,
        window_size: cli.window_size,
        output: cli.output,
        logging: cli.log_level.map(|level| LoggingConfig { level }),
    };
    let config = load_config(cli.config.as_deref(), &overrides)?;
    init_tracing(&config.logging.level)?;
    run(&config)?;
    Ok(())
}

fn main() -> ExitCode {
    match run_cli(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::InputNotFound(path)) => {
            eprintln!("Input file not found: {}", path.display());
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
