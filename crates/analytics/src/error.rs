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

use thiserror::Error;

/// Errors raised by the windowed aggregation itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("no events to aggregate")]
    EmptyInput,

    #[error("window size must be between 1 and {max} minutes, got {0}", max = u32::MAX)]
    InvalidWindow(i64),
}

/// Errors converting a raw record into an [`crate::Event`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("malformed timestamp `{value}`")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("duration must be a non-negative number, got {0}")]
    InvalidDuration(f64),
}
