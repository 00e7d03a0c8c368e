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

//! Per-minute moving average of translation delivery time.
//!
//! Events carrying a timestamp and a duration are bucketed by minute and
//! averaged over a trailing window of a configurable number of minutes. See
//! [`aggregation::MovingAverage`] for the entry point.

pub mod aggregation;
pub mod error;
pub mod event;

pub use aggregation::{MovingAverage, OutputPoint};
pub use error::{AggregationError, EventError};
pub use event::{Event, RawEvent};
