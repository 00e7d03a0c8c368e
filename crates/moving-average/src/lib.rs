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

//! Moving average of translation delivery time
//!
//! Reads translation delivered events from a JSON Lines file, computes the
//! per-minute average delivery time over a trailing window and writes the
//! results as JSON Lines to a file or standard output.

pub mod config;
pub mod error;
pub mod input;
pub mod output;

use crate::{config::AppConfig, error::CliError};
use delivery_time_analytics::MovingAverage;
use tracing::info;

/// Run the whole pipeline for the given configuration, returns the number of
/// minutes written
pub fn run(config: &AppConfig) -> Result<usize, CliError> {
    let moving_average = MovingAverage::new(config.window_size)?;
    let events = input::read_events(&config.input_file)?;
    info!(
        input = %config.input_file.display(),
        events = events.len(),
        window_minutes = moving_average.window_size().minutes(),
        "computing moving average"
    );
    let points = moving_average.aggregate(events)?;
    let mut writer = output::open_writer(config.output.as_deref())?;
    output::write_points(&mut writer, &points)?;
    info!(minutes = points.len(), "moving average written");
    Ok(points.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use delivery_time_analytics::AggregationError;
    use rstest::rstest;
    use std::{fs, io::Write, path::PathBuf};
    use tempfile::NamedTempFile;

    fn config(input_file: PathBuf, window_size: i64, output: Option<PathBuf>) -> AppConfig {
        AppConfig {
            input_file,
            window_size,
            output,
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_run_to_file() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(
            input,
            "{{\"timestamp\": \"2024-01-01 00:00:30.000000\", \"duration\": 10}}"
        )
        .unwrap();
        writeln!(
            input,
            "{{\"timestamp\": \"2024-01-01 00:01:30.000000\", \"duration\": 20}}"
        )
        .unwrap();
        let output = NamedTempFile::new().unwrap();
        let written = run(&config(
            input.path().to_path_buf(),
            2,
            Some(output.path().to_path_buf()),
        ))
        .unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(output.path()).unwrap(),
            "{\"date\":\"2024-01-01 00:00:00\",\"average_delivery_time\":10.0}\n\
             {\"date\":\"2024-01-01 00:01:00\",\"average_delivery_time\":15.0}\n"
        );
    }

    #[test]
    fn test_run_empty_input() {
        let input = NamedTempFile::new().unwrap();
        let err = run(&config(input.path().to_path_buf(), 10, None)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Aggregation(AggregationError::EmptyInput)
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_run_invalid_window(#[case] window_size: i64) {
        let err = run(&config(
            PathBuf::from("never-read.json"),
            window_size,
            None,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Aggregation(AggregationError::InvalidWindow(w)) if w == window_size
        ));
    }

    #[test]
    fn test_run_input_not_found() {
        let err = run(&config(PathBuf::from("missing/events.json"), 10, None)).unwrap_err();
        assert!(matches!(err, CliError::InputNotFound(_)));
    }
}
