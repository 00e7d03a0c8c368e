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

use delivery_time_analytics::{AggregationError, EventError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("input file `{}` not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("configuration file `{}` not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("invalid logging level `{0}`")]
    InvalidLogLevel(String),

    #[error("setting default tracing subscriber failed")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("reading or writing data error")]
    Io(#[from] std::io::Error),

    #[error("reading input line {line} failed")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON on input line {line}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid event on input line {line}: {source}")]
    Event {
        line: usize,
        #[source]
        source: EventError,
    },

    #[error("serializing output error")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
